//! Zone ("wijk") models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named delivery area from the zone catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone name, e.g. "Chaam1".
    pub name: String,
    /// Workload tier used to look up the zone price.
    pub segments: u32,
    /// Fixed periodic price overriding the segment lookup.
    #[serde(default)]
    pub flat_price: Option<Decimal>,
    /// Depot the zone is served from.
    #[serde(default)]
    pub depot: Option<String>,
}

/// A zone worked on a specific day, as reported by a schedule resolver.
///
/// Catalog zones only need a name. Ad-hoc zones submitted by employees
/// may carry their own segment count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedZone {
    /// Zone name.
    pub name: String,
    /// Segment count entered with the submission.
    #[serde(default)]
    pub segments: Option<u32>,
}

impl WorkedZone {
    /// A worked zone identified by name only.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_zone_with_defaults() {
        let yaml = "name: Chaam1\nsegments: 3\n";
        let zone: Zone = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(zone.name, "Chaam1");
        assert_eq!(zone.segments, 3);
        assert_eq!(zone.flat_price, None);
        assert_eq!(zone.depot, None);
    }

    #[test]
    fn test_deserialize_zone_with_flat_price() {
        let json = r#"{"name": "Breda7", "segments": 2, "flat_price": "900", "depot": "Breda"}"#;
        let zone: Zone = serde_json::from_str(json).unwrap();
        assert_eq!(zone.flat_price, Some(Decimal::new(900, 0)));
        assert_eq!(zone.depot.as_deref(), Some("Breda"));
    }

    #[test]
    fn test_worked_zone_named() {
        let zone = WorkedZone::named("Lexmond2");
        assert_eq!(zone.name, "Lexmond2");
        assert!(zone.segments.is_none());
    }
}
