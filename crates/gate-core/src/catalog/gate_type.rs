//! Gate type categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four product categories a gate can belong to.
///
/// Serialized as snake_case keys; the German catalog labels are accepted on
/// input so records exported by the browser tool still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateType {
    #[serde(alias = "T\u{fc}ren")]
    Doors,
    #[serde(alias = "Fl\u{fc}geltore und Falttore")]
    WingGates,
    #[serde(alias = "Schubtore")]
    PushGates,
    #[serde(alias = "Schiebet\u{fc}ren")]
    SlidingDoors,
}

impl GateType {
    pub const ALL: [GateType; 4] = [
        GateType::Doors,
        GateType::WingGates,
        GateType::PushGates,
        GateType::SlidingDoors,
    ];

    /// Machine key, e.g. `wing_gates`.
    pub fn as_str(&self) -> &'static str {
        match self {
            GateType::Doors => "doors",
            GateType::WingGates => "wing_gates",
            GateType::PushGates => "push_gates",
            GateType::SlidingDoors => "sliding_doors",
        }
    }

    /// Catalog label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            GateType::Doors => "T\u{fc}ren",
            GateType::WingGates => "Fl\u{fc}geltore und Falttore",
            GateType::PushGates => "Schubtore",
            GateType::SlidingDoors => "Schiebet\u{fc}ren",
        }
    }

    /// Parse a key, a short alias or a catalog label.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(found) = Self::ALL.iter().find(|t| t.label() == s) {
            return Some(*found);
        }
        match s.to_lowercase().replace('-', "_").as_str() {
            "doors" | "door" => Some(GateType::Doors),
            "wing_gates" | "wing" | "folding" => Some(GateType::WingGates),
            "push_gates" | "push" => Some(GateType::PushGates),
            "sliding_doors" | "sliding" => Some(GateType::SlidingDoors),
            _ => None,
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_variants() {
        assert_eq!(GateType::from_str("wing"), Some(GateType::WingGates));
        assert_eq!(GateType::from_str("push-gates"), Some(GateType::PushGates));
        assert_eq!(GateType::from_str("Schiebetüren"), Some(GateType::SlidingDoors));
        assert_eq!(GateType::from_str("Garagen"), None);
    }

    #[test]
    fn test_serde_accepts_labels() {
        let t: GateType = serde_json::from_str("\"Flügeltore und Falttore\"").unwrap();
        assert_eq!(t, GateType::WingGates);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"wing_gates\"");
    }
}
