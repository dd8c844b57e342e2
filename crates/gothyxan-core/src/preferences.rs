//! Outfit-generation preferences and the directives that mutate them.
//!
//! Every mutator either applies fully or leaves the preferences untouched and
//! returns an [`ErrorKind::InvalidInput`] error whose message can be shown to
//! the user as-is.
//!
//! [`ErrorKind::InvalidInput`]: crate::ErrorKind::InvalidInput

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Style applied to fresh preferences.
pub const DEFAULT_STYLE: &str = "streetwear";

/// Lower bound assumed when scaling a custom budget without a minimum.
const FALLBACK_BUDGET_MIN: i64 = 200;
/// Upper bound assumed when scaling a custom budget without a maximum.
const FALLBACK_BUDGET_MAX: i64 = 900;

/// Budget strategy sent to the styling backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BudgetMode {
    /// Prefer lower-priced items.
    #[default]
    Cheaper,
    /// Prefer premium items.
    Premium,
    /// Explicit price bounds.
    Custom,
}

/// A parsed `/budget` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetDirective {
    /// Switch to the cheaper preset.
    Cheaper,
    /// Switch to the premium preset.
    Premium,
    /// Switch to explicit bounds.
    Custom { min: i64, max: i64 },
}

impl FromStr for BudgetDirective {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let mut parts = input.split_whitespace();
        let Some(mode) = parts.next() else {
            return Err(Error::invalid_input(
                "Usage: /budget cheaper OR /budget premium OR /budget custom 200 900",
            ));
        };

        let mode = BudgetMode::from_str(mode).map_err(|_| {
            Error::invalid_input("Budget mode must be: cheaper, premium or custom")
        })?;

        match mode {
            BudgetMode::Cheaper => Ok(Self::Cheaper),
            BudgetMode::Premium => Ok(Self::Premium),
            BudgetMode::Custom => {
                let (Some(min), Some(max)) = (parts.next(), parts.next()) else {
                    return Err(Error::invalid_input(
                        "Usage for custom: /budget custom 200 900",
                    ));
                };

                match (min.parse::<i64>(), max.parse::<i64>()) {
                    (Ok(min), Ok(max)) => Ok(Self::Custom { min, max }),
                    _ => Err(Error::invalid_input("Budget values must be numbers")),
                }
            }
        }
    }
}

/// A parsed `/luxury` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LuxuryToggle {
    On,
    Off,
}

impl LuxuryToggle {
    /// Parses user input, trimming surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self> {
        Self::from_str(input.trim())
            .map_err(|_| Error::invalid_input("Usage: /luxury on or /luxury off"))
    }
}

/// Interactive budget shortcut triggered from the outfit keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BudgetAdjustment {
    Cheaper,
    Premium,
}

/// Current outfit-generation parameters for one chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPreferences {
    pub style: String,
    pub occasion: Option<String>,
    pub city: Option<String>,
    pub budget_mode: BudgetMode,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub luxury_only: bool,
}

impl Default for RequestPreferences {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_owned(),
            occasion: None,
            city: None,
            budget_mode: BudgetMode::default(),
            budget_min: None,
            budget_max: None,
            luxury_only: false,
        }
    }
}

impl RequestPreferences {
    /// Sets the style, trimmed and lowercased.
    pub fn set_style(&mut self, input: &str) -> Result<&str> {
        self.style = normalized(input, true).ok_or_else(|| {
            Error::invalid_input("Usage: /setstyle streetwear")
        })?;
        Ok(self.style.as_str())
    }

    /// Sets the occasion, trimmed and lowercased.
    pub fn set_occasion(&mut self, input: &str) -> Result<&str> {
        let occasion = normalized(input, true)
            .ok_or_else(|| Error::invalid_input("Usage: /setoccasion date"))?;
        Ok(self.occasion.insert(occasion).as_str())
    }

    /// Sets the city, trimmed with case preserved.
    pub fn set_city(&mut self, input: &str) -> Result<&str> {
        let city = normalized(input, false)
            .ok_or_else(|| Error::invalid_input("Usage: /setcity London"))?;
        Ok(self.city.insert(city).as_str())
    }

    /// Parses and applies a `/budget` directive.
    pub fn apply_budget_input(&mut self, input: &str) -> Result<BudgetDirective> {
        let directive = BudgetDirective::from_str(input)?;
        self.apply_budget(directive);
        Ok(directive)
    }

    /// Applies an already parsed budget directive.
    pub fn apply_budget(&mut self, directive: BudgetDirective) {
        match directive {
            BudgetDirective::Cheaper => self.switch_preset(BudgetMode::Cheaper),
            BudgetDirective::Premium => self.switch_preset(BudgetMode::Premium),
            BudgetDirective::Custom { min, max } => {
                self.budget_mode = BudgetMode::Custom;
                self.budget_min = Some(min);
                self.budget_max = Some(max);
            }
        }
    }

    /// Applies a `/luxury` toggle.
    ///
    /// Turning luxury on forces the premium preset; turning it off only
    /// clears the flag.
    pub fn set_luxury(&mut self, toggle: LuxuryToggle) {
        match toggle {
            LuxuryToggle::On => self.switch_preset(BudgetMode::Premium),
            LuxuryToggle::Off => self.luxury_only = false,
        }
    }

    /// Applies a keyboard budget shortcut.
    ///
    /// Custom budgets are scaled in place, presets are switched directly.
    pub fn adjust(&mut self, adjustment: BudgetAdjustment) {
        if self.budget_mode != BudgetMode::Custom {
            match adjustment {
                BudgetAdjustment::Cheaper => self.switch_preset(BudgetMode::Cheaper),
                BudgetAdjustment::Premium => self.switch_preset(BudgetMode::Premium),
            }
            return;
        }

        let min = self.budget_min.unwrap_or(FALLBACK_BUDGET_MIN);
        let max = self.budget_max.unwrap_or(FALLBACK_BUDGET_MAX);

        let (min, max) = match adjustment {
            BudgetAdjustment::Cheaper => {
                let min = scale(min, 0.7).max(50);
                (min, scale(max, 0.75).max(min + 50))
            }
            BudgetAdjustment::Premium => (scale(min, 1.2), scale(max, 1.3)),
        };

        self.budget_min = Some(min);
        self.budget_max = Some(max);
        self.luxury_only = adjustment == BudgetAdjustment::Premium;
    }

    /// Human-readable budget summary, e.g. `custom 200 900` or `cheaper`.
    pub fn budget_summary(&self) -> String {
        let bound = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();
        format!(
            "{} {} {}",
            self.budget_mode,
            bound(self.budget_min),
            bound(self.budget_max)
        )
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
    }

    fn switch_preset(&mut self, mode: BudgetMode) {
        self.budget_mode = mode;
        self.budget_min = None;
        self.budget_max = None;
        self.luxury_only = mode == BudgetMode::Premium;
    }
}

fn normalized(input: &str, lowercase: bool) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(if lowercase {
        trimmed.to_lowercase()
    } else {
        trimmed.to_owned()
    })
}

/// Scales a bound, truncating toward zero.
fn scale(value: i64, factor: f64) -> i64 {
    (value as f64 * factor) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn custom(min: i64, max: i64) -> RequestPreferences {
        RequestPreferences {
            budget_mode: BudgetMode::Custom,
            budget_min: Some(min),
            budget_max: Some(max),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let prefs = RequestPreferences::default();
        assert_eq!(prefs.style, "streetwear");
        assert_eq!(prefs.budget_mode, BudgetMode::Cheaper);
        assert!(prefs.occasion.is_none());
        assert!(prefs.city.is_none());
        assert!(prefs.budget_min.is_none());
        assert!(prefs.budget_max.is_none());
        assert!(!prefs.luxury_only);
    }

    #[test]
    fn test_text_setters_normalize() {
        let mut prefs = RequestPreferences::default();
        assert_eq!(prefs.set_style("  Old Money ").unwrap(), "old money");
        assert_eq!(prefs.set_occasion("DATE").unwrap(), "date");
        assert_eq!(prefs.set_city("  London ").unwrap(), "London");
        assert_eq!(prefs.city.as_deref(), Some("London"));
    }

    #[test]
    fn test_text_setters_reject_empty() {
        let mut prefs = RequestPreferences::default();
        let error = prefs.set_style("   ").unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert_eq!(prefs.style, "streetwear");
        assert!(prefs.set_occasion("").is_err());
        assert!(prefs.set_city("\t").is_err());
        assert!(prefs.city.is_none());
    }

    #[test]
    fn test_presets_clear_bounds() {
        for (input, luxury) in [("cheaper", false), ("premium", true), ("PREMIUM", true)] {
            let mut prefs = custom(200, 900);
            prefs.apply_budget_input(input).unwrap();
            assert!(prefs.budget_min.is_none());
            assert!(prefs.budget_max.is_none());
            assert_eq!(prefs.luxury_only, luxury);
            assert_ne!(prefs.budget_mode, BudgetMode::Custom);
        }
    }

    #[test]
    fn test_custom_budget() {
        let mut prefs = RequestPreferences {
            luxury_only: true,
            ..Default::default()
        };
        let directive = prefs.apply_budget_input("custom 200 900").unwrap();
        assert_eq!(directive, BudgetDirective::Custom { min: 200, max: 900 });
        assert_eq!(prefs.budget_mode, BudgetMode::Custom);
        assert_eq!(prefs.budget_min, Some(200));
        assert_eq!(prefs.budget_max, Some(900));
        assert!(prefs.luxury_only);
    }

    #[test]
    fn test_custom_budget_rejects_non_numeric() {
        let mut prefs = RequestPreferences::default();
        let before = prefs.clone();

        let error = prefs.apply_budget_input("custom abc 900").unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert_eq!(error.message.as_deref(), Some("Budget values must be numbers"));
        assert_eq!(prefs, before);

        let error = prefs.apply_budget_input("custom 200").unwrap_err();
        assert_eq!(
            error.message.as_deref(),
            Some("Usage for custom: /budget custom 200 900")
        );
        assert_eq!(prefs, before);
    }

    #[test]
    fn test_unknown_budget_mode() {
        let mut prefs = RequestPreferences::default();
        let error = prefs.apply_budget_input("free").unwrap_err();
        assert_eq!(
            error.message.as_deref(),
            Some("Budget mode must be: cheaper, premium or custom")
        );
        assert!(prefs.apply_budget_input("  ").is_err());
    }

    #[test]
    fn test_luxury_toggle() {
        let mut prefs = custom(100, 300);
        prefs.set_luxury(LuxuryToggle::parse(" ON ").unwrap());
        assert!(prefs.luxury_only);
        assert_eq!(prefs.budget_mode, BudgetMode::Premium);
        assert!(prefs.budget_min.is_none());

        prefs.set_luxury(LuxuryToggle::Off);
        assert!(!prefs.luxury_only);
        assert_eq!(prefs.budget_mode, BudgetMode::Premium);

        assert!(LuxuryToggle::parse("maybe").is_err());
    }

    #[test]
    fn test_adjust_cheaper_custom() {
        let mut prefs = custom(200, 900);
        prefs.luxury_only = true;
        prefs.adjust(BudgetAdjustment::Cheaper);
        assert_eq!(prefs.budget_mode, BudgetMode::Custom);
        assert_eq!(prefs.budget_min, Some(140));
        assert_eq!(prefs.budget_max, Some(675));
        assert!(!prefs.luxury_only);
    }

    #[test]
    fn test_adjust_cheaper_floors() {
        let mut prefs = custom(60, 80);
        prefs.adjust(BudgetAdjustment::Cheaper);
        assert_eq!(prefs.budget_min, Some(50));
        assert_eq!(prefs.budget_max, Some(100));
    }

    #[test]
    fn test_adjust_premium_custom() {
        let mut prefs = custom(200, 900);
        prefs.adjust(BudgetAdjustment::Premium);
        assert_eq!(prefs.budget_min, Some(240));
        assert_eq!(prefs.budget_max, Some(1170));
        assert!(prefs.luxury_only);
    }

    #[test]
    fn test_adjust_custom_without_bounds() {
        let mut prefs = RequestPreferences {
            budget_mode: BudgetMode::Custom,
            ..Default::default()
        };
        prefs.adjust(BudgetAdjustment::Cheaper);
        assert_eq!(prefs.budget_min, Some(140));
        assert_eq!(prefs.budget_max, Some(675));
    }

    #[test]
    fn test_adjust_switches_presets() {
        let mut prefs = RequestPreferences::default();
        prefs.adjust(BudgetAdjustment::Premium);
        assert_eq!(prefs.budget_mode, BudgetMode::Premium);
        assert!(prefs.luxury_only);

        prefs.adjust(BudgetAdjustment::Cheaper);
        assert_eq!(prefs.budget_mode, BudgetMode::Cheaper);
        assert!(!prefs.luxury_only);
        assert!(prefs.budget_min.is_none());
    }

    #[test]
    fn test_budget_summary() {
        assert_eq!(RequestPreferences::default().budget_summary(), "cheaper");
        assert_eq!(custom(200, 900).budget_summary(), "custom 200 900");
    }

    #[test]
    fn test_serialized_keys() {
        let value = serde_json::to_value(custom(1, 2)).unwrap();
        assert_eq!(value["budget_mode"], "custom");
        assert_eq!(value["budget_min"], 1);
        assert_eq!(value["luxury_only"], false);
        assert!(value["occasion"].is_null());
    }
}
