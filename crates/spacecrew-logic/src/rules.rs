//! Tunable crew rules.
//!
//! Every number the crew state machine relies on lives in [`CrewRules`].
//! The default rules harden the clamping gaps of the legacy game. The
//! [`CrewRules::legacy`] preset brings back the old unclamped gauge paths
//! and the old sleep window so the two can be compared side by side.
//!
//! Rules can only shrink the gauge ceiling and the daily action budget,
//! never raise them past 100 and 2.
//!
//! ```
//! use spacecrew_logic::rules::{validate_rules, CrewRules};
//!
//! let rules = CrewRules::default();
//! assert!(validate_rules(&rules).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{actions, gauges, plague, sleep};

/// How gauge primitives treat values outside their range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clamping {
    /// Hunger and tiredness stay in `[0, gauge_max]` and health stays in
    /// `[0, maximum_health]` after every mutation.
    Strict,
    /// Only the increase paths of hunger and health and the floor of
    /// `decrement_current_health` are clamped. Direct setters, tiredness
    /// adjustments, hunger decrements and the plague tick are not.
    Legacy,
}

/// Rules applied by a [`crate::crew::CrewMember`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewRules {
    /// Ceiling for hunger level and tiredness.
    pub gauge_max: i32,
    /// Action points granted per day.
    pub max_actions: u8,
    /// Tiredness above this jumps to `gauge_max` when sleeping.
    pub sleep_jump_threshold: i32,
    /// Flat tiredness gain at or below the jump threshold.
    pub sleep_gain: i32,
    /// Health lost per space-plague tick.
    pub plague_damage: i32,
    pub clamping: Clamping,
    /// Whether a fully exhausted member (tiredness 0) may sleep.
    pub exhausted_can_sleep: bool,
}

impl Default for CrewRules {
    fn default() -> Self {
        Self {
            gauge_max: gauges::MAX,
            max_actions: actions::PER_DAY,
            sleep_jump_threshold: sleep::JUMP_THRESHOLD,
            sleep_gain: sleep::GAIN,
            plague_damage: plague::DAMAGE,
            clamping: Clamping::Strict,
            exhausted_can_sleep: true,
        }
    }
}

impl CrewRules {
    /// The legacy game's clamping gaps and sleep window.
    ///
    /// Preserved: setters, tiredness adjustments, hunger decrements and the
    /// plague tick are unclamped, and tiredness 0 cannot sleep. Not
    /// preserved: dead members still never get actions back, and
    /// `describe` reports tiredness on the tiredness line.
    pub fn legacy() -> Self {
        Self {
            clamping: Clamping::Legacy,
            exhausted_can_sleep: false,
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.clamping == Clamping::Strict
    }

    /// Parse rules from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, RulesLoadError> {
        let rules: CrewRules = serde_json::from_str(json)?;
        let errors = validate_rules(&rules);
        if errors.is_empty() {
            Ok(rules)
        } else {
            Err(RulesLoadError::Invalid(errors))
        }
    }
}

/// Rules validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Gauge ceiling must be positive.
    NonPositiveGaugeMax(i32),
    /// Gauge ceiling above the 100-point scale.
    GaugeMaxTooHigh(i32),
    /// At least one action per day.
    NoActions,
    /// More actions per day than the game allows.
    TooManyActions(u8),
    /// Jump threshold must lie in `[0, gauge_max)`.
    ThresholdOutOfRange { threshold: i32, gauge_max: i32 },
    NonPositiveSleepGain(i32),
    NonPositivePlagueDamage(i32),
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::NonPositiveGaugeMax(v) => write!(f, "gauge max must be positive, got {}", v),
            RulesError::GaugeMaxTooHigh(v) => {
                write!(f, "gauge max {} is above {}", v, gauges::MAX)
            }
            RulesError::NoActions => write!(f, "crew must get at least one action per day"),
            RulesError::TooManyActions(v) => {
                write!(f, "{} actions per day is above {}", v, actions::PER_DAY)
            }
            RulesError::ThresholdOutOfRange {
                threshold,
                gauge_max,
            } => write!(
                f,
                "sleep jump threshold {} must be in 0..{}",
                threshold, gauge_max
            ),
            RulesError::NonPositiveSleepGain(v) => {
                write!(f, "sleep gain must be positive, got {}", v)
            }
            RulesError::NonPositivePlagueDamage(v) => {
                write!(f, "plague damage must be positive, got {}", v)
            }
        }
    }
}

impl std::error::Error for RulesError {}

/// Validate rules, returning all errors found.
pub fn validate_rules(rules: &CrewRules) -> Vec<RulesError> {
    let mut errors = Vec::new();

    if rules.gauge_max <= 0 {
        errors.push(RulesError::NonPositiveGaugeMax(rules.gauge_max));
    }
    if rules.gauge_max > gauges::MAX {
        errors.push(RulesError::GaugeMaxTooHigh(rules.gauge_max));
    }
    if rules.max_actions == 0 {
        errors.push(RulesError::NoActions);
    }
    if rules.max_actions > actions::PER_DAY {
        errors.push(RulesError::TooManyActions(rules.max_actions));
    }
    if !(0..rules.gauge_max).contains(&rules.sleep_jump_threshold) {
        errors.push(RulesError::ThresholdOutOfRange {
            threshold: rules.sleep_jump_threshold,
            gauge_max: rules.gauge_max,
        });
    }
    if rules.sleep_gain <= 0 {
        errors.push(RulesError::NonPositiveSleepGain(rules.sleep_gain));
    }
    if rules.plague_damage <= 0 {
        errors.push(RulesError::NonPositivePlagueDamage(rules.plague_damage));
    }

    errors
}

/// Errors that can occur loading rules from JSON.
#[derive(Debug)]
pub enum RulesLoadError {
    Json(serde_json::Error),
    Invalid(Vec<RulesError>),
}

impl From<serde_json::Error> for RulesLoadError {
    fn from(e: serde_json::Error) -> Self {
        RulesLoadError::Json(e)
    }
}

impl std::fmt::Display for RulesLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesLoadError::Json(e) => write!(f, "rules parse error: {}", e),
            RulesLoadError::Invalid(errors) => {
                let list: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "invalid rules: {}", list.join("; "))
            }
        }
    }
}

impl std::error::Error for RulesLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RulesLoadError::Json(e) => Some(e),
            RulesLoadError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_valid() {
        let errors = validate_rules(&CrewRules::default());
        assert!(errors.is_empty(), "default rules should be valid: {errors:?}");
    }

    #[test]
    fn legacy_rules_are_valid() {
        let rules = CrewRules::legacy();
        assert!(validate_rules(&rules).is_empty());
        assert_eq!(rules.clamping, Clamping::Legacy);
        assert!(!rules.exhausted_can_sleep);
        assert_eq!(rules.plague_damage, 10);
    }

    #[test]
    fn zero_gauge_max() {
        let rules = CrewRules {
            gauge_max: 0,
            ..CrewRules::default()
        };
        let errors = validate_rules(&rules);
        assert!(errors.contains(&RulesError::NonPositiveGaugeMax(0)));
        // threshold 50 no longer fits under a zero ceiling either
        assert!(errors
            .iter()
            .any(|e| matches!(e, RulesError::ThresholdOutOfRange { .. })));
    }

    #[test]
    fn no_actions() {
        let rules = CrewRules {
            max_actions: 0,
            ..CrewRules::default()
        };
        assert_eq!(validate_rules(&rules), vec![RulesError::NoActions]);
    }

    #[test]
    fn ceiling_and_budget_cannot_grow() {
        let rules = CrewRules {
            gauge_max: 400,
            max_actions: 5,
            sleep_jump_threshold: 350,
            ..CrewRules::default()
        };
        let errors = validate_rules(&rules);
        assert!(errors.contains(&RulesError::GaugeMaxTooHigh(400)));
        assert!(errors.contains(&RulesError::TooManyActions(5)));
    }

    #[test]
    fn smaller_ceiling_and_budget_allowed() {
        let rules = CrewRules {
            gauge_max: 80,
            max_actions: 1,
            sleep_jump_threshold: 40,
            ..CrewRules::default()
        };
        assert!(validate_rules(&rules).is_empty());
    }

    #[test]
    fn from_json_rejects_oversized_rules() {
        let mut value = serde_json::to_value(CrewRules::default()).unwrap();
        value["max_actions"] = serde_json::json!(5);
        value["gauge_max"] = serde_json::json!(400);
        value["sleep_jump_threshold"] = serde_json::json!(350);
        match CrewRules::from_json(&value.to_string()) {
            Err(RulesLoadError::Invalid(errors)) => {
                assert!(errors.contains(&RulesError::TooManyActions(5)));
                assert!(errors.contains(&RulesError::GaugeMaxTooHigh(400)));
            }
            other => panic!("expected invalid rules, got {other:?}"),
        }
    }

    #[test]
    fn threshold_at_ceiling() {
        let rules = CrewRules {
            sleep_jump_threshold: 100,
            ..CrewRules::default()
        };
        assert!(validate_rules(&rules).contains(&RulesError::ThresholdOutOfRange {
            threshold: 100,
            gauge_max: 100
        }));
    }

    #[test]
    fn non_positive_amounts() {
        let rules = CrewRules {
            sleep_gain: 0,
            plague_damage: -5,
            ..CrewRules::default()
        };
        let errors = validate_rules(&rules);
        assert!(errors.contains(&RulesError::NonPositiveSleepGain(0)));
        assert!(errors.contains(&RulesError::NonPositivePlagueDamage(-5)));
    }

    #[test]
    fn from_json_roundtrip_default() {
        let json = serde_json::to_string(&CrewRules::default()).unwrap();
        let rules = CrewRules::from_json(&json).unwrap();
        assert_eq!(rules, CrewRules::default());
    }

    #[test]
    fn from_json_rejects_invalid() {
        let mut value = serde_json::to_value(CrewRules::default()).unwrap();
        value["max_actions"] = serde_json::json!(0);
        let err = CrewRules::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, RulesLoadError::Invalid(ref e) if e == &vec![RulesError::NoActions]));
        assert!(err.to_string().contains("at least one action"));
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = CrewRules::from_json("{not json").unwrap_err();
        assert!(matches!(err, RulesLoadError::Json(_)));
    }
}
