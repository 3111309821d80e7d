//! Prometheus rules produced for an SLO.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Prometheus recording or alerting rule.
///
/// Exactly one of `record` and `alert` is set; use the constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    pub expr: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl Rule {
    pub fn recording(
        record: impl Into<String>,
        expr: impl Into<String>,
        labels: BTreeMap<String, String>,
    ) -> Self {
        Self {
            record: Some(record.into()),
            alert: None,
            expr: expr.into(),
            labels,
            annotations: BTreeMap::new(),
        }
    }

    pub fn alerting(
        alert: impl Into<String>,
        expr: impl Into<String>,
        labels: BTreeMap<String, String>,
        annotations: BTreeMap<String, String>,
    ) -> Self {
        Self {
            record: None,
            alert: Some(alert.into()),
            expr: expr.into(),
            labels,
            annotations,
        }
    }

    /// The record or alert name.
    pub fn name(&self) -> &str {
        self.record
            .as_deref()
            .or(self.alert.as_deref())
            .unwrap_or_default()
    }

    pub fn is_alert(&self) -> bool {
        self.alert.is_some()
    }
}

/// All rules generated for a single SLO, split by purpose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SloRules {
    #[serde(rename = "SLIErrorRecRules")]
    pub sli_error_rec_rules: Vec<Rule>,
    #[serde(rename = "MetadataRecRules")]
    pub metadata_rec_rules: Vec<Rule>,
    #[serde(rename = "AlertRules")]
    pub alert_rules: Vec<Rule>,
}

impl SloRules {
    /// Iterate every rule regardless of purpose.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.sli_error_rec_rules
            .iter()
            .chain(self.metadata_rec_rules.iter())
            .chain(self.alert_rules.iter())
    }

    pub fn len(&self) -> usize {
        self.sli_error_rec_rules.len() + self.metadata_rec_rules.len() + self.alert_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_constructors() {
        let rec = Rule::recording("slo:objective:ratio", "vector(0.99)", BTreeMap::new());
        assert_eq!(rec.name(), "slo:objective:ratio");
        assert!(!rec.is_alert());

        let alert = Rule::alerting("HighErrorRate", "up == 0", BTreeMap::new(), BTreeMap::new());
        assert_eq!(alert.name(), "HighErrorRate");
        assert!(alert.is_alert());
    }

    #[test]
    fn test_recording_rule_yaml_omits_alert_fields() {
        let mut labels = BTreeMap::new();
        labels.insert("sloth_window".to_string(), "5m".to_string());
        let rec = Rule::recording("slo:sli_error:ratio_rate5m", "vector(1)", labels);
        let yaml = serde_yaml::to_string(&rec).unwrap();
        assert!(yaml.contains("record: slo:sli_error:ratio_rate5m"));
        assert!(!yaml.contains("alert"));
        assert!(!yaml.contains("annotations"));
    }

    #[test]
    fn test_slo_rules_counts() {
        let mut rules = SloRules::default();
        assert!(rules.is_empty());
        rules
            .metadata_rec_rules
            .push(Rule::recording("a", "vector(1)", BTreeMap::new()));
        rules.alert_rules.push(Rule::alerting(
            "b",
            "vector(1)",
            BTreeMap::new(),
            BTreeMap::new(),
        ));
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.iter().map(Rule::name).collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
