//! Outfit generation request payload.

use serde::Serialize;

use crate::{BudgetMode, RequestPreferences};

/// Payload of an outfit generation call.
///
/// Optional fields are omitted from the JSON rather than sent as null:
/// occasion and city only when non-empty, budget bounds only for custom
/// budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRequest {
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub budget_mode: BudgetMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<i64>,
    pub luxury_only: bool,
}

impl From<&RequestPreferences> for OutfitRequest {
    fn from(preferences: &RequestPreferences) -> Self {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        let custom = preferences.budget_mode == BudgetMode::Custom;

        Self {
            style: preferences.style.clone(),
            occasion: non_empty(&preferences.occasion),
            city: non_empty(&preferences.city),
            budget_mode: preferences.budget_mode,
            budget_min: preferences.budget_min.filter(|_| custom),
            budget_max: preferences.budget_max.filter(|_| custom),
            luxury_only: preferences.luxury_only,
        }
    }
}
