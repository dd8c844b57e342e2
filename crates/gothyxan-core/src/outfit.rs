//! Backend outfit records and their lenient typed projection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, IntoStaticStr};

/// Apparel slots every outfit is expected to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
pub enum OutfitSlot {
    Top,
    Bottom,
    Outerwear,
    Shoes,
}

impl OutfitSlot {
    /// All slots in display order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Outerwear, Self::Shoes];

    /// JSON key of this slot in the backend record.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Outerwear => "outerwear",
            Self::Shoes => "shoes",
        }
    }
}

/// Outfit recommendation as returned by the styling backend.
///
/// The raw JSON is kept untouched so it can be sent back on save; accessors
/// project the fields the bot displays and default anything missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outfit(Value);

impl Outfit {
    /// Wraps a raw backend value.
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Returns the raw backend value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the outfit, returning the raw backend value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns the item in the given slot, empty when absent.
    pub fn slot(&self, slot: OutfitSlot) -> OutfitItem<'_> {
        OutfitItem::from_value(self.0.get(slot.key()))
    }

    /// Returns accessory items, skipping entries that are not objects.
    pub fn accessories(&self) -> Vec<OutfitItem<'_>> {
        self.0
            .get("accessories")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(OutfitItem::new)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Style label chosen by the backend.
    pub fn style(&self) -> Option<&str> {
        self.text("style")
    }

    /// Weather summary the outfit was built for.
    pub fn weather_context(&self) -> Option<&str> {
        self.text("weather_context")
    }

    /// Budget range description.
    pub fn budget_range(&self) -> Option<&str> {
        self.text("budget_range")
    }

    /// Explanation of why the outfit works.
    pub fn explanation(&self) -> Option<&str> {
        self.text("explanation")
    }

    /// Total price, rendered as the backend sent it.
    pub fn total_price(&self) -> Option<String> {
        self.0.get("total_price").and_then(display_scalar)
    }

    /// Quality scores, zero when absent.
    pub fn scores(&self) -> OutfitScores {
        let Some(scores) = self.0.get("scores").and_then(Value::as_object) else {
            return OutfitScores::default();
        };

        let score = |key: &str| scores.get(key).and_then(display_scalar);
        OutfitScores {
            style_coherence: score("style_coherence"),
            budget_efficiency: score("budget_efficiency"),
            weather_compatibility: score("weather_compatibility"),
        }
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl From<Value> for Outfit {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

/// Scores attached to an outfit, kept as display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutfitScores {
    pub style_coherence: Option<String>,
    pub budget_efficiency: Option<String>,
    pub weather_compatibility: Option<String>,
}

/// Borrowed view over one outfit item.
#[derive(Debug, Clone, Copy)]
pub struct OutfitItem<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> OutfitItem<'a> {
    fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields: Some(fields),
        }
    }

    fn from_value(value: Option<&'a Value>) -> Self {
        Self {
            fields: value.and_then(Value::as_object),
        }
    }

    /// Returns true when the backend sent no object for this item.
    pub fn is_empty(&self) -> bool {
        self.fields.is_none_or(Map::is_empty)
    }

    /// Brand name.
    pub fn brand(&self) -> Option<&'a str> {
        self.text("brand")
    }

    /// Item name.
    pub fn name(&self) -> Option<&'a str> {
        self.text("item")
    }

    /// Price rendered as the backend sent it.
    pub fn price(&self) -> Option<String> {
        self.get("price").and_then(display_scalar)
    }

    /// Best available image URL: high resolution, medium, then flat `image_url`.
    ///
    /// Only absolute `http(s)` URLs are returned.
    pub fn image_url(&self) -> Option<&'a str> {
        let image = self.get("image").and_then(Value::as_object);
        let nested = |key: &str| {
            image
                .and_then(|image| image.get(key))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };

        nested("high_res")
            .or_else(|| nested("medium"))
            .or_else(|| self.text("image_url"))
            .filter(|url| is_http_url(url))
    }

    /// Purchase link: affiliate link first, then reference link.
    ///
    /// Only absolute `http(s)` URLs are returned.
    pub fn link(&self) -> Option<&'a str> {
        self.text("affiliate_link")
            .or_else(|| self.text("reference_link"))
            .filter(|url| is_http_url(url))
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(key))
    }

    fn text(&self, key: &str) -> Option<&'a str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Renders numbers and non-empty strings; zero, null and other shapes are absent.
fn display_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
