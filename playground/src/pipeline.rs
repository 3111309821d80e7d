//! Compilation of one specification.

use crate::BridgeResult;
use slo_core::CompilationResult;
use slo_generator::Generator;
use tracing::debug;

/// Compile raw specification bytes. Single attempt; no partial results.
pub fn compile(generator: &Generator, spec: &[u8]) -> BridgeResult<CompilationResult> {
    let result = generator.generate_from_raw(spec)?;
    debug!(
        slos = result.slo_results.len(),
        rules = result.rule_count(),
        "Compiled SLO specification"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{shared_generator, ErrorKind};

    #[test]
    fn test_compile_parse_failure() {
        let err = compile(shared_generator().unwrap(), b"not valid yaml: [").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Compilation);
        assert!(err.message().contains("parse"));
    }

    #[test]
    fn test_compile_validation_failure() {
        let spec = b"version: prometheus/v1\nservice: svc\nslos: []\n";
        let err = compile(shared_generator().unwrap(), spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Compilation);
        assert!(err.message().contains("at least one SLO"));
    }

    #[test]
    fn test_compile_unknown_plugin() {
        let spec = br#"
version: prometheus/v1
service: svc
slos:
  - name: a
    objective: 99
    sli:
      plugin:
        id: missing/plugin
    alerting:
      name: A
"#;
        let err = compile(shared_generator().unwrap(), spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Compilation);
        assert!(err.message().contains("missing/plugin"));
    }
}
