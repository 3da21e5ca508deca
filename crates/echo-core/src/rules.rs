//! Rule switches for the points the card text leaves open.

use serde::{Deserialize, Serialize};

/// Configurable rule variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Clamp a battle's reward at zero when edicts push it below
    pub clamp_negative_reward: bool,
    /// Strength gained (times the edict multiplier) when a sabotage guess is
    /// right. Zero makes the guess purely informational.
    pub sabotage_strength: u8,
    /// Include the overseer in views and the final event once the game ends
    pub reveal_overseer_at_end: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            clamp_negative_reward: true,
            sabotage_strength: 0,
            reveal_overseer_at_end: true,
        }
    }
}

impl RuleConfig {
    /// Rules as printed on the original cards, where a correct sabotage
    /// guess is worth +3 strength.
    pub fn classic() -> Self {
        Self {
            sabotage_strength: 3,
            ..Self::default()
        }
    }

    /// Parse from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = RuleConfig::default();
        assert!(rules.clamp_negative_reward);
        assert_eq!(rules.sabotage_strength, 0);
        assert!(rules.reveal_overseer_at_end);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules = RuleConfig::from_json(r#"{ "sabotage_strength": 3 }"#).unwrap();
        assert_eq!(rules, RuleConfig::classic());

        let rules = RuleConfig::from_json(r#"{ "clamp_negative_reward": false }"#).unwrap();
        assert!(!rules.clamp_negative_reward);
        assert_eq!(rules.sabotage_strength, 0);
    }
}
