use std::env;

use crate::domain::mvp::MvpWeights;
use crate::errors::domain::ConfigurationError;

/// House-rule and tuning switches, fixed for the lifetime of a match.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Floor team scores at zero when applying a redemption penalty.
    pub clamp_score_at_zero: bool,
    /// Allow a FIFA Save to score while the defending team is at match
    /// point. When false the save resolves as a plain catch.
    pub fifa_save_at_match_point: bool,
    pub mvp: MvpWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clamp_score_at_zero: true,
            fifa_save_at_match_point: true,
            mvp: MvpWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Build a config from environment overrides on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let defaults = Self::default();
        Ok(Self {
            clamp_score_at_zero: bool_var("ENGINE_CLAMP_SCORE_AT_ZERO", defaults.clamp_score_at_zero)?,
            fifa_save_at_match_point: bool_var(
                "ENGINE_FIFA_SAVE_AT_MATCH_POINT",
                defaults.fifa_save_at_match_point,
            )?,
            mvp: MvpWeights {
                hit_rate_weight: weight_var(
                    "ENGINE_MVP_HIT_RATE_WEIGHT",
                    defaults.mvp.hit_rate_weight,
                )?,
                on_fire_bonus: weight_var("ENGINE_MVP_ON_FIRE_BONUS", defaults.mvp.on_fire_bonus)?,
            },
        })
    }
}

/// Get a boolean override from the environment (absent means the default)
fn bool_var(name: &str, default: bool) -> Result<bool, ConfigurationError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            other => Err(ConfigurationError::invalid_value(
                name,
                format!("expected a boolean, got '{other}'"),
            )),
        },
    }
}

/// Get a finite numeric override from the environment
fn weight_var(name: &str, default: f64) -> Result<f64, ConfigurationError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => {
            let value: f64 = raw.parse().map_err(|_| {
                ConfigurationError::invalid_value(name, format!("expected a number, got '{raw}'"))
            })?;
            if !value.is_finite() {
                return Err(ConfigurationError::invalid_value(name, "must be finite"));
            }
            Ok(value)
        }
    }
}
