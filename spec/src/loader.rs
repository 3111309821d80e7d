//! Format detection and decoding.

use crate::{SpecError, SpecResult};
use serde_yaml::Value;
use slo_core::{k8s_v1, prometheus_v1, OriginalSource};

/// Specification formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// `version: prometheus/v1`
    PrometheusV1,
    /// `apiVersion: sloth.slok.dev/v1`, `kind: PrometheusServiceLevel`
    KubernetesV1,
}

impl SpecFormat {
    /// Detect the format from the document header.
    pub fn detect(doc: &Value) -> SpecResult<Self> {
        if !doc.is_mapping() {
            return Err(SpecError::NotAMapping);
        }

        let field = |name: &str| doc.get(name).and_then(Value::as_str);
        match (field("apiVersion"), field("kind"), field("version")) {
            (Some(k8s_v1::API_VERSION), Some(k8s_v1::KIND), _) => Ok(SpecFormat::KubernetesV1),
            (Some(api), kind, _) => Err(SpecError::unsupported_format(format!(
                "apiVersion={} kind={}",
                api,
                kind.unwrap_or("<none>")
            ))),
            (None, _, Some(prometheus_v1::VERSION)) => Ok(SpecFormat::PrometheusV1),
            (None, _, Some(version)) => {
                Err(SpecError::unsupported_format(format!("version={}", version)))
            }
            (None, _, None) => Err(SpecError::unsupported_format("no version or apiVersion")),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpecFormat::PrometheusV1 => prometheus_v1::VERSION,
            SpecFormat::KubernetesV1 => k8s_v1::API_VERSION,
        }
    }
}

/// Load a raw specification into its source document.
pub fn load(raw: &[u8]) -> SpecResult<OriginalSource> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(SpecError::Empty);
    }

    let doc: Value = serde_yaml::from_slice(raw).map_err(SpecError::Parse)?;
    let format = SpecFormat::detect(&doc)?;

    let source = match format {
        SpecFormat::PrometheusV1 => OriginalSource::Generic(
            serde_yaml::from_value(doc).map_err(|e| SpecError::decode(format.name(), e))?,
        ),
        SpecFormat::KubernetesV1 => OriginalSource::Kubernetes(
            serde_yaml::from_value(doc).map_err(|e| SpecError::decode(format.name(), e))?,
        ),
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERIC: &str = r#"
version: "prometheus/v1"
service: "myservice"
labels:
  owner: "myteam"
slos:
  - name: "requests-availability"
    objective: 99.9
    sli:
      events:
        error_query: sum(rate(http_requests_total{code=~"5.."}[{{.window}}]))
        total_query: sum(rate(http_requests_total[{{.window}}]))
    alerting:
      name: MyServiceHighErrorRate
"#;

    const KUBERNETES: &str = r#"
apiVersion: sloth.slok.dev/v1
kind: PrometheusServiceLevel
metadata:
  name: svc-a
  namespace: ns1
spec:
  service: svc-a
  slos:
    - name: latency
      objective: 95
      sli:
        raw:
          errorRatioQuery: rate(slow[{{.window}}]) / rate(all[{{.window}}])
      alerting:
        pageAlert:
          disable: true
        ticketAlert:
          disable: true
"#;

    #[test]
    fn test_load_generic() {
        match load(GENERIC.as_bytes()).unwrap() {
            OriginalSource::Generic(spec) => {
                assert_eq!(spec.service, "myservice");
                assert_eq!(spec.slos.len(), 1);
                assert_eq!(spec.slos[0].objective, 99.9);
                assert!(spec.slos[0].sli.events.is_some());
            }
            other => panic!("expected generic source, got {:?}", other),
        }
    }

    #[test]
    fn test_load_kubernetes() {
        match load(KUBERNETES.as_bytes()).unwrap() {
            OriginalSource::Kubernetes(psl) => {
                assert_eq!(psl.metadata.name, "svc-a");
                assert_eq!(psl.metadata.namespace, "ns1");
                assert!(psl.spec.slos[0].alerting.page_alert.disable);
            }
            other => panic!("expected kubernetes source, got {:?}", other),
        }
    }

    #[test]
    fn test_load_json_document() {
        let json = r#"{"version": "prometheus/v1", "service": "svc", "slos": []}"#;
        assert!(matches!(
            load(json.as_bytes()).unwrap(),
            OriginalSource::Generic(_)
        ));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let err = load(b"not valid yaml: [").unwrap_err();
        assert!(matches!(err, SpecError::Parse(_)));
        assert!(err.to_string().contains("could not parse"));
    }

    #[test]
    fn test_load_empty() {
        assert!(matches!(load(b"  \n").unwrap_err(), SpecError::Empty));
    }

    #[test]
    fn test_load_unsupported_formats() {
        let err = load(b"version: openslo/v1alpha\n").unwrap_err();
        assert!(err.to_string().contains("openslo/v1alpha"));

        let err = load(b"apiVersion: v1\nkind: ConfigMap\n").unwrap_err();
        assert!(matches!(err, SpecError::UnsupportedFormat { .. }));

        let err = load(b"service: svc\n").unwrap_err();
        assert!(matches!(err, SpecError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_not_a_mapping() {
        assert!(matches!(load(b"- a\n- b\n").unwrap_err(), SpecError::NotAMapping));
    }

    #[test]
    fn test_load_decode_error_names_format() {
        let err = load(b"version: prometheus/v1\nslos: []\n").unwrap_err();
        assert!(matches!(err, SpecError::Decode { .. }));
        assert!(err.to_string().contains("prometheus/v1"));
    }

    #[test]
    fn test_load_coerces_scalar_labels() {
        let doc = r#"
version: prometheus/v1
service: svc
labels:
  tier: 1
slos:
  - name: availability
    objective: 99
    labels:
      critical: true
    sli:
      plugin:
        id: test/plugin
        options:
          threshold: 0.25
    alerting:
      name: Down
      page_alert:
        labels:
          priority: 2
"#;
        let spec = match load(doc.as_bytes()).unwrap() {
            OriginalSource::Generic(spec) => spec,
            other => panic!("expected generic document, got {:?}", other),
        };
        assert_eq!(spec.labels["tier"], "1");
        let slo = &spec.slos[0];
        assert_eq!(slo.labels["critical"], "true");
        assert_eq!(slo.sli.plugin.as_ref().unwrap().options["threshold"], "0.25");
        assert_eq!(slo.alerting.page_alert.labels["priority"], "2");
    }

    #[test]
    fn test_load_coerces_kubernetes_metadata_labels() {
        let doc = KUBERNETES.replace("  name: svc-a\n", "  name: svc-a\n  labels:\n    version: 3\n");
        match load(doc.as_bytes()).unwrap() {
            OriginalSource::Kubernetes(psl) => assert_eq!(psl.metadata.labels["version"], "3"),
            other => panic!("expected kubernetes document, got {:?}", other),
        }
    }
}
