//! Emergency alert models

use serde::{Deserialize, Serialize};

/// Priority of an emergency alert.
///
/// Ordered: `Low < Medium < High < Critical`. The global alert level of a
/// trip is the maximum priority across all merged alerts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertPriority {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlertPriority::Low => "LOW",
            AlertPriority::Medium => "MEDIUM",
            AlertPriority::High => "HIGH",
            AlertPriority::Critical => "CRITICAL",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for AlertPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(AlertPriority::Low),
            "MEDIUM" => Ok(AlertPriority::Medium),
            "HIGH" => Ok(AlertPriority::High),
            "CRITICAL" => Ok(AlertPriority::Critical),
            _ => Err(format!("Unknown alert priority: '{}'", s)),
        }
    }
}

/// An active emergency alert in a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Unique alert identifier
    pub alert_id: String,
    /// Alert type as declared by the emergency backend (FIRE, ACCIDENT, ...)
    #[serde(rename = "type")]
    pub alert_type: String,
    /// Free-text description
    pub description: String,
    /// Alert priority
    pub priority: AlertPriority,
    /// Zone the alert applies to
    pub zone: String,
    /// Creation timestamp as reported by the backend
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn priority_ordering_matches_severity() {
        assert!(AlertPriority::Low < AlertPriority::Medium);
        assert!(AlertPriority::Medium < AlertPriority::High);
        assert!(AlertPriority::High < AlertPriority::Critical);
    }

    #[test]
    fn priority_round_trips_through_str() {
        for p in [
            AlertPriority::Low,
            AlertPriority::Medium,
            AlertPriority::High,
            AlertPriority::Critical,
        ] {
            assert_eq!(p.to_string().parse::<AlertPriority>().unwrap(), p);
        }
        assert!("URGENT".parse::<AlertPriority>().is_err());
    }
}
