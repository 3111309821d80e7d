//! Multiwindow multi-burn-rate alert windows.
//!
//! Windows follow the Google SRE workbook: a page pair (quick, slow) and a
//! ticket pair (quick, slow), each with a short and a long window and the
//! share of the period's error budget it is allowed to consume.

use crate::{GeneratorError, GeneratorResult};
use serde::Deserialize;
use slo_core::PromDuration;

const API_VERSION: &str = "sloth.slok.dev/v1";
const KIND: &str = "AlertWindows";

/// One alert window pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    /// Share of the period error budget consumed at the alert threshold.
    pub error_budget_percent: f64,
    pub short_window: PromDuration,
    pub long_window: PromDuration,
}

impl Window {
    const fn new(error_budget_percent: f64, short_window: PromDuration, long_window: PromDuration) -> Self {
        Self {
            error_budget_percent,
            short_window,
            long_window,
        }
    }

    /// Error budget burn rate that triggers this window for an SLO period.
    pub fn burn_rate_factor(&self, slo_period: PromDuration) -> f64 {
        (self.error_budget_percent * slo_period.as_secs() as f64)
            / (100.0 * self.long_window.as_secs() as f64)
    }
}

/// The complete window set for one SLO period.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertWindows {
    pub slo_period: PromDuration,
    pub page_quick: Window,
    pub page_slow: Window,
    pub ticket_quick: Window,
    pub ticket_slow: Window,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertWindowsDocument {
    api_version: String,
    kind: String,
    spec: AlertWindowsSpec,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertWindowsSpec {
    slo_period: PromDuration,
    page: WindowPair,
    ticket: WindowPair,
}

#[derive(Debug, Deserialize)]
struct WindowPair {
    quick: Window,
    slow: Window,
}

impl AlertWindows {
    /// Built-in windows for the supported default periods (28d and 30d).
    pub fn builtin(slo_period: PromDuration) -> GeneratorResult<Self> {
        let supported = [PromDuration::from_days(28), PromDuration::from_days(30)];
        if !supported.contains(&slo_period) {
            return Err(GeneratorError::alert_windows(format!(
                "no built-in alert windows for SLO period {}",
                slo_period
            )));
        }

        Ok(Self {
            slo_period,
            page_quick: Window::new(2.0, PromDuration::from_minutes(5), PromDuration::from_hours(1)),
            page_slow: Window::new(5.0, PromDuration::from_minutes(30), PromDuration::from_hours(6)),
            ticket_quick: Window::new(10.0, PromDuration::from_hours(2), PromDuration::from_days(1)),
            ticket_slow: Window::new(10.0, PromDuration::from_hours(6), PromDuration::from_days(3)),
        })
    }

    /// Parse an `AlertWindows` document.
    pub fn from_yaml(raw: &str) -> GeneratorResult<Self> {
        let doc: AlertWindowsDocument =
            serde_yaml::from_str(raw).map_err(|e| GeneratorError::alert_windows(e.to_string()))?;
        if doc.api_version != API_VERSION || doc.kind != KIND {
            return Err(GeneratorError::alert_windows(format!(
                "expected {} {}, got {} {}",
                API_VERSION, KIND, doc.api_version, doc.kind
            )));
        }

        let windows = Self {
            slo_period: doc.spec.slo_period,
            page_quick: doc.spec.page.quick,
            page_slow: doc.spec.page.slow,
            ticket_quick: doc.spec.ticket.quick,
            ticket_slow: doc.spec.ticket.slow,
        };
        windows.validate()?;
        Ok(windows)
    }

    fn validate(&self) -> GeneratorResult<()> {
        if self.slo_period.is_zero() {
            return Err(GeneratorError::alert_windows("SLO period must be positive"));
        }
        let named = [
            ("page quick", &self.page_quick),
            ("page slow", &self.page_slow),
            ("ticket quick", &self.ticket_quick),
            ("ticket slow", &self.ticket_slow),
        ];
        for (name, window) in named {
            if window.short_window.is_zero() || window.long_window.is_zero() {
                return Err(GeneratorError::alert_windows(format!(
                    "{} windows must be positive",
                    name
                )));
            }
            if window.short_window >= window.long_window {
                return Err(GeneratorError::alert_windows(format!(
                    "{} short window must be shorter than its long window",
                    name
                )));
            }
            if window.long_window > self.slo_period {
                return Err(GeneratorError::alert_windows(format!(
                    "{} long window exceeds the SLO period",
                    name
                )));
            }
            if !(window.error_budget_percent > 0.0 && window.error_budget_percent <= 100.0) {
                return Err(GeneratorError::alert_windows(format!(
                    "{} error budget percent must be in (0, 100]",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Every distinct alert window, shortest first.
    pub fn rate_windows(&self) -> Vec<PromDuration> {
        let mut windows: Vec<PromDuration> = [
            self.page_quick,
            self.page_slow,
            self.ticket_quick,
            self.ticket_slow,
        ]
        .iter()
        .flat_map(|w| [w.short_window, w.long_window])
        .collect();
        windows.sort();
        windows.dedup();
        windows
    }

    /// The shortest alert window.
    pub fn shortest_window(&self) -> PromDuration {
        self.rate_windows()
            .into_iter()
            .next()
            .unwrap_or(self.page_quick.short_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM: &str = r#"
apiVersion: sloth.slok.dev/v1
kind: AlertWindows
spec:
  sloPeriod: 7d
  page:
    quick:
      errorBudgetPercent: 8
      shortWindow: 5m
      longWindow: 1h
    slow:
      errorBudgetPercent: 12.5
      shortWindow: 30m
      longWindow: 6h
  ticket:
    quick:
      errorBudgetPercent: 20
      shortWindow: 2h
      longWindow: 1d
    slow:
      errorBudgetPercent: 42
      shortWindow: 6h
      longWindow: 3d
"#;

    #[test]
    fn test_builtin_30d_burn_rates() {
        let windows = AlertWindows::builtin(PromDuration::from_days(30)).unwrap();
        let period = windows.slo_period;
        assert_eq!(windows.page_quick.burn_rate_factor(period), 14.4);
        assert_eq!(windows.page_slow.burn_rate_factor(period), 6.0);
        assert_eq!(windows.ticket_quick.burn_rate_factor(period), 3.0);
        assert_eq!(windows.ticket_slow.burn_rate_factor(period), 1.0);
    }

    #[test]
    fn test_builtin_unsupported_period() {
        let err = AlertWindows::builtin(PromDuration::from_days(7)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_rate_windows_sorted_unique() {
        let windows = AlertWindows::builtin(PromDuration::from_days(28)).unwrap();
        let names: Vec<String> = windows.rate_windows().iter().map(|d| d.to_string()).collect();
        assert_eq!(names, vec!["5m", "30m", "1h", "2h", "6h", "1d", "3d"]);
        assert_eq!(windows.shortest_window(), PromDuration::from_minutes(5));
    }

    #[test]
    fn test_custom_windows() {
        let windows = AlertWindows::from_yaml(CUSTOM).unwrap();
        assert_eq!(windows.slo_period, PromDuration::from_days(7));
        assert_eq!(windows.ticket_slow.error_budget_percent, 42.0);
    }

    #[test]
    fn test_custom_windows_rejects_wrong_kind() {
        let raw = CUSTOM.replace("kind: AlertWindows", "kind: Other");
        assert!(AlertWindows::from_yaml(&raw).is_err());
    }

    #[test]
    fn test_custom_windows_rejects_inverted_window() {
        let raw = CUSTOM.replace("shortWindow: 5m", "shortWindow: 2h");
        let err = AlertWindows::from_yaml(&raw).unwrap_err();
        assert!(err.to_string().contains("page quick"));
    }
}
