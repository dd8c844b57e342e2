//! Outfit presentation: message text, photo album, purchase links and the
//! action keyboard.

mod delivery;

use gothyxan_core::{Outfit, OutfitItem, OutfitSlot};
use teloxide::utils::html::escape;

pub use self::delivery::PhotoDelivery;
use crate::handler::CallbackAction;
use crate::transport::{Keyboard, KeyboardButton, Photo};

/// Messages longer than this are truncated.
pub const MAX_TEXT_CHARS: usize = 3900;

/// Characters kept before the ellipsis when truncating.
const TRUNCATED_CHARS: usize = 3890;

/// Maximum photos in one album.
pub const MAX_PHOTOS: usize = 6;

/// Maximum links in one links message.
pub const MAX_LINKS: usize = 8;

const ACCESSORY_LINES: usize = 3;
const ACCESSORY_PHOTOS: usize = 2;
const ACCESSORY_LINKS: usize = 3;

const DEFAULT_BRAND: &str = "Brand";
const DEFAULT_ITEM: &str = "Item";
const DEFAULT_EXPLANATION: &str = "Balanced branded outfit";
const NOT_AVAILABLE: &str = "N/A";

/// Help text sent on `/start`.
pub const HELP_TEXT: &str = "GOTHYXAN premium bot ready.
Commands:
/setstyle <style>
/setoccasion <occasion>
/setcity <city>
/budget cheaper|premium|custom <min> <max>
/luxury on|off
/generate
/state";

fn slot_label(slot: OutfitSlot) -> &'static str {
    match slot {
        OutfitSlot::Top => "Top",
        OutfitSlot::Bottom => "Bottom",
        OutfitSlot::Outerwear => "Outerwear",
        OutfitSlot::Shoes => "Shoes",
    }
}

/// Labeled items: the four slots followed by up to `accessories` accessories.
fn labeled_items(outfit: &Outfit, accessories: usize) -> Vec<(String, OutfitItem<'_>)> {
    let slots = OutfitSlot::ALL
        .into_iter()
        .map(|slot| (slot_label(slot).to_owned(), outfit.slot(slot)));
    let extras = outfit
        .accessories()
        .into_iter()
        .take(accessories)
        .enumerate()
        .map(|(index, item)| (format!("Accessory {}", index + 1), item));

    slots.chain(extras).collect()
}

fn brand(item: &OutfitItem<'_>) -> String {
    escape(item.brand().unwrap_or(DEFAULT_BRAND))
}

fn name(item: &OutfitItem<'_>) -> String {
    escape(item.name().unwrap_or(DEFAULT_ITEM))
}

fn price(item: &OutfitItem<'_>) -> String {
    item.price().unwrap_or_else(|| "0".to_owned())
}

fn or_na(value: Option<&str>) -> String {
    escape(value.unwrap_or(NOT_AVAILABLE))
}

/// Renders the outfit as a Telegram HTML message.
pub fn format_outfit(outfit: &Outfit) -> String {
    let mut lines = vec![
        "✨ <b>GOTHYXAN Outfit</b>".to_owned(),
        format!("<b>Style</b>: {}", or_na(outfit.style())),
        format!("<b>Weather</b>: {}", or_na(outfit.weather_context())),
        format!("<b>Budget</b>: {}", or_na(outfit.budget_range())),
        String::new(),
    ];

    for slot in OutfitSlot::ALL {
        let item = outfit.slot(slot);
        lines.push(format!(
            "<b>{}</b>: {} — {} (${})",
            slot_label(slot),
            brand(&item),
            name(&item),
            price(&item)
        ));
    }

    lines.push("<b>Accessories</b>:".to_owned());
    let accessories = outfit.accessories();
    if accessories.is_empty() {
        lines.push("• none".to_owned());
    }
    for item in accessories.iter().take(ACCESSORY_LINES) {
        lines.push(format!("• {} — {} (${})", brand(item), name(item), price(item)));
    }

    let scores = outfit.scores();
    let score = |value: Option<String>| value.unwrap_or_else(|| "0".to_owned());
    let score_line = format!(
        "Style {}/100 | Budget {}/100 | Weather {}/100",
        score(scores.style_coherence),
        score(scores.budget_efficiency),
        score(scores.weather_compatibility)
    );

    lines.push(String::new());
    lines.push(format!(
        "<b>Total</b>: ${}",
        escape(&outfit.total_price().unwrap_or_else(|| "0".to_owned()))
    ));
    lines.push(format!("<b>Scores</b>: {}", escape(&score_line)));
    lines.push(format!(
        "<b>Why it works</b>: {}",
        escape(outfit.explanation().unwrap_or(DEFAULT_EXPLANATION))
    ));

    truncate(lines.join("\n"))
}

/// Truncates text over [`MAX_TEXT_CHARS`] characters, appending an ellipsis.
pub fn truncate(text: String) -> String {
    if text.chars().count() <= MAX_TEXT_CHARS {
        return text;
    }

    let mut truncated: String = text.chars().take(TRUNCATED_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Photos of the outfit items, at most [`MAX_PHOTOS`].
///
/// Items without an http(s) image are skipped. Every photo carries its
/// caption; [`PhotoDelivery`] keeps only the first one in albums.
pub fn collect_photos(outfit: &Outfit) -> Vec<Photo> {
    labeled_items(outfit, ACCESSORY_PHOTOS)
        .into_iter()
        .filter_map(|(label, item)| {
            let url = item.image_url()?;
            let caption = format!(
                "<b>{}</b>\n{} — {}\n${}",
                escape(&label.to_uppercase()),
                brand(&item),
                name(&item),
                price(&item)
            );
            Some(Photo {
                url: url.to_owned(),
                caption: Some(caption),
            })
        })
        .take(MAX_PHOTOS)
        .collect()
}

/// Purchase link lines for items with an http(s) link.
pub fn collect_links(outfit: &Outfit) -> Vec<String> {
    labeled_items(outfit, ACCESSORY_LINKS)
        .into_iter()
        .filter_map(|(label, item)| {
            let link = item.link()?;
            Some(format!(
                "• <b>{}</b>: <a href=\"{}\">{} — {}</a>",
                escape(&label),
                escape(link),
                brand(&item),
                name(&item)
            ))
        })
        .collect()
}

/// Renders the links message, or `None` when there is nothing to link.
pub fn format_links(outfit: &Outfit) -> Option<String> {
    let links = collect_links(outfit);
    if links.is_empty() {
        return None;
    }

    let body = links
        .into_iter()
        .take(MAX_LINKS)
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("<b>🛒 Buy Links</b>\n\n{body}"))
}

/// Inline keyboard attached to every outfit.
pub fn outfit_keyboard() -> Keyboard {
    let button = |text: &str, action: CallbackAction| KeyboardButton::new(text, action.to_string());

    vec![
        vec![
            button("🔁 Regenerate", CallbackAction::Regenerate),
            button("❤️ Save", CallbackAction::Save),
        ],
        vec![
            button("💰 Cheaper", CallbackAction::Cheaper),
            button("💎 Luxury", CallbackAction::Premium),
        ],
        vec![button("🛒 View Links", CallbackAction::Links)],
    ]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn item(brand: &str, name: &str, price: u32, image: &str, link: &str) -> serde_json::Value {
        json!({
            "brand": brand,
            "item": name,
            "price": price,
            "image": { "high_res": image },
            "affiliate_link": link
        })
    }

    fn full_outfit() -> Outfit {
        Outfit::new(json!({
            "style": "goth",
            "weather_context": "rainy 12°C",
            "budget_range": "$200-$900",
            "top": item("Rick Owens", "Tee", 120, "https://cdn/top.jpg", "https://shop/top"),
            "bottom": item("Acne", "Jeans", 180, "https://cdn/bottom.jpg", "https://shop/bottom"),
            "outerwear": item("Ann D", "Coat", 400, "ftp://cdn/coat.jpg", "javascript:alert(1)"),
            "shoes": item("Dr. Martens", "1460", 150, "https://cdn/shoes.jpg", "https://shop/shoes"),
            "accessories": [
                item("A1", "Ring", 30, "https://cdn/a1.jpg", "https://shop/a1"),
                item("A2", "Chain", 40, "https://cdn/a2.jpg", "https://shop/a2"),
                item("A3", "Belt", 50, "https://cdn/a3.jpg", "https://shop/a3"),
                item("A4", "Hat", 60, "https://cdn/a4.jpg", "https://shop/a4")
            ],
            "total_price": 880,
            "scores": { "style_coherence": 91, "budget_efficiency": 80, "weather_compatibility": 77 },
            "explanation": "Layered <dark> palette"
        }))
    }

    #[test]
    fn test_format_full_outfit() {
        let text = format_outfit(&full_outfit());

        assert!(text.starts_with("✨ <b>GOTHYXAN Outfit</b>\n<b>Style</b>: goth\n"));
        assert!(text.contains("<b>Top</b>: Rick Owens — Tee ($120)"));
        assert!(text.contains("<b>Shoes</b>: Dr. Martens — 1460 ($150)"));
        assert!(text.contains("• A3 — Belt ($50)"));
        assert!(!text.contains("Hat"));
        assert!(text.contains("<b>Total</b>: $880"));
        assert!(text.contains("Style 91/100 | Budget 80/100 | Weather 77/100"));
        assert!(text.contains("Layered &lt;dark&gt; palette"));
    }

    #[test]
    fn test_format_defaults_missing_fields() {
        let text = format_outfit(&Outfit::new(json!({ "top": "not an object", "scores": [] })));

        assert!(text.contains("<b>Style</b>: N/A"));
        assert!(text.contains("<b>Top</b>: Brand — Item ($0)"));
        assert!(text.contains("<b>Accessories</b>:\n• none"));
        assert!(text.contains("Style 0/100 | Budget 0/100 | Weather 0/100"));
        assert!(text.ends_with("<b>Why it works</b>: Balanced branded outfit"));
    }

    #[test]
    fn test_format_escapes_html() {
        let outfit = Outfit::new(json!({
            "top": { "brand": "<script>", "item": "A & B", "price": 5 }
        }));
        let text = format_outfit(&outfit);

        assert!(text.contains("&lt;script&gt; — A &amp; B ($5)"));
        assert!(!text.contains("<script>"));
    }

    #[test]
    fn test_truncate_long_text() {
        let outfit = Outfit::new(json!({ "explanation": "x".repeat(5000) }));
        let text = format_outfit(&outfit);

        assert_eq!(text.chars().count(), TRUNCATED_CHARS + 3);
        assert!(text.ends_with("..."));

        let short = "short".to_owned();
        assert_eq!(truncate(short.clone()), short);
    }

    #[test]
    fn test_collect_photos() {
        let photos = collect_photos(&full_outfit());
        let urls: Vec<_> = photos.iter().map(|p| p.url.as_str()).collect();

        assert_eq!(
            urls,
            vec![
                "https://cdn/top.jpg",
                "https://cdn/bottom.jpg",
                "https://cdn/shoes.jpg",
                "https://cdn/a1.jpg",
                "https://cdn/a2.jpg",
            ]
        );
        assert_eq!(
            photos[0].caption.as_deref(),
            Some("<b>TOP</b>\nRick Owens — Tee\n$120")
        );
        assert_eq!(
            photos[3].caption.as_deref(),
            Some("<b>ACCESSORY 1</b>\nA1 — Ring\n$30")
        );
    }

    #[test]
    fn test_collect_photos_fallback_sources() {
        let outfit = Outfit::new(json!({
            "top": { "image": { "medium": "https://cdn/medium.jpg" } },
            "bottom": { "image_url": "http://cdn/flat.jpg" },
            "shoes": { "image": { "high_res": "" }, "image_url": "relative.jpg" }
        }));
        let urls: Vec<_> = collect_photos(&outfit).into_iter().map(|p| p.url).collect();

        assert_eq!(urls, vec!["https://cdn/medium.jpg", "http://cdn/flat.jpg"]);
    }

    #[test]
    fn test_photos_capped() {
        let image = |n: u32| json!({ "image_url": format!("https://cdn/{n}.jpg") });
        let outfit = Outfit::new(json!({
            "top": image(1), "bottom": image(2), "outerwear": image(3), "shoes": image(4),
            "accessories": [image(5), image(6), image(7)]
        }));

        assert_eq!(collect_photos(&outfit).len(), MAX_PHOTOS);
    }

    #[test]
    fn test_collect_links() {
        let links = collect_links(&full_outfit());

        assert_eq!(links.len(), 6);
        assert_eq!(
            links[0],
            "• <b>Top</b>: <a href=\"https://shop/top\">Rick Owens — Tee</a>"
        );
        assert!(links.iter().all(|line| !line.contains("javascript")));
        assert!(links[5].contains("Accessory 3"));
    }

    #[test]
    fn test_reference_link_fallback() {
        let outfit = Outfit::new(json!({ "top": { "reference_link": "https://ref/top" } }));
        let text = format_links(&outfit).unwrap();

        assert!(text.starts_with("<b>🛒 Buy Links</b>\n\n"));
        assert!(text.contains("href=\"https://ref/top\""));
        assert!(format_links(&Outfit::default()).is_none());
    }

    #[test]
    fn test_keyboard_callback_data() {
        let data: Vec<_> = outfit_keyboard()
            .into_iter()
            .flatten()
            .map(|button| button.data)
            .collect();

        assert_eq!(
            data,
            vec![
                "action:regenerate",
                "action:save",
                "budget:cheaper",
                "budget:premium",
                "action:links",
            ]
        );
    }
}
