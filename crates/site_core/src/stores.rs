//! Thrift-store models and the helpers behind the store detail page and featured carousel.
//!
//! The store endpoints are loosely typed, so payloads are normalized field by field from
//! [`serde_json::Value`]: blank strings become `None`, non-finite numbers are dropped, and entries
//! missing their identity are skipped instead of failing the whole response.

use serde_json::{Map, Value};
use uuid::{Uuid, Variant};

use crate::contents::legacy_route::safe_decode_path_segment;

/// Profile prefix used when an Instagram handle is not already a URL.
pub const INSTAGRAM_BASE_URL: &str = "https://instagram.com/";

/// One gallery photo of a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreDetailsImage {
    /// Backend image id.
    pub id: i64,
    /// Absolute image URL.
    pub url: String,
    /// Gallery position; missing values sort first.
    pub display_order: i64,
    /// Whether this photo is the cover.
    pub is_cover: bool,
}

/// Full public profile of one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreDetails {
    /// Store UUID.
    pub id: String,
    /// Display name.
    pub name: String,
    pub cover_image_url: Option<String>,
    pub address_line: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    /// Non-blank category labels in backend order.
    pub categories: Vec<String>,
    /// Average rating, when any review exists.
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub neighborhood: Option<String>,
    /// Short highlight label such as "Novo".
    pub badge_label: Option<String>,
    pub is_favorite: bool,
    pub is_online_store: bool,
    pub description: Option<String>,
    /// Gallery sorted by [`StoreDetailsImage::display_order`].
    pub images: Vec<StoreDetailsImage>,
    /// ISO-8601 creation timestamp.
    pub created_at: Option<String>,
}

/// Store card shown in the home carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedStore {
    /// Store UUID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Cover photo URL.
    pub cover_image_url: String,
}

fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn number(object: &Map<String, Value>, key: &str) -> Option<f64> {
    object
        .get(key)
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
}

fn flag(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).and_then(Value::as_bool) == Some(true)
}

fn normalize_image(item: &Value) -> Option<StoreDetailsImage> {
    let object = item.as_object()?;
    Some(StoreDetailsImage {
        id: object.get("id").and_then(Value::as_i64)?,
        url: text(object, "url")?,
        display_order: object
            .get("displayOrder")
            .and_then(Value::as_i64)
            .unwrap_or_default(),
        is_cover: flag(object, "isCover"),
    })
}

/// Normalizes a store detail payload; `None` when it is not an object or lacks `id`/`name`.
pub fn normalize_store_details(payload: &Value) -> Option<StoreDetails> {
    let object = payload.as_object()?;

    let categories = object
        .get("categories")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut images: Vec<StoreDetailsImage> = object
        .get("images")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(normalize_image).collect())
        .unwrap_or_default();
    images.sort_by_key(|image| image.display_order);

    Some(StoreDetails {
        id: text(object, "id")?,
        name: text(object, "name")?,
        cover_image_url: text(object, "coverImageUrl"),
        address_line: text(object, "addressLine"),
        latitude: number(object, "latitude"),
        longitude: number(object, "longitude"),
        opening_hours: text(object, "openingHours"),
        facebook: text(object, "facebook"),
        instagram: text(object, "instagram"),
        website: text(object, "website"),
        phone: text(object, "phone"),
        whatsapp: text(object, "whatsapp"),
        categories,
        rating: number(object, "rating"),
        review_count: object.get("reviewCount").and_then(Value::as_u64),
        neighborhood: text(object, "neighborhood"),
        badge_label: text(object, "badgeLabel"),
        is_favorite: flag(object, "isFavorite"),
        is_online_store: flag(object, "isOnlineStore"),
        description: text(object, "description"),
        images,
        created_at: text(object, "createdAt"),
    })
}

/// Normalizes the featured-stores payload. Anything but an array is empty; entries without an
/// id, name, or cover are skipped.
pub fn normalize_featured_stores(payload: &Value) -> Vec<FeaturedStore> {
    let Some(items) = payload.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|object| {
            Some(FeaturedStore {
                id: text(object, "id")?,
                name: text(object, "name")?,
                cover_image_url: text(object, "coverImageUrl")?,
            })
        })
        .collect()
}

/// Decodes a `/store/{id}` path segment and accepts it only as a hyphenated RFC 4122 UUID.
pub fn parse_store_id(raw: &str) -> Option<String> {
    let decoded = safe_decode_path_segment(raw)?;
    let trimmed = decoded.trim();
    let parsed = Uuid::parse_str(trimmed).ok()?;
    (trimmed.len() == 36 && parsed.get_variant() == Variant::RFC4122).then(|| trimmed.to_string())
}

/// Site path of a store's detail page.
pub fn store_page_path(id: &str) -> String {
    format!("/store/{id}")
}

impl StoreDetails {
    /// Whether any contact link can be rendered.
    pub fn has_contact_channel(&self) -> bool {
        self.website.is_some()
            || self.instagram.is_some()
            || self.facebook.is_some()
            || self.phone.is_some()
            || self.whatsapp.is_some()
    }

    /// One-line summary used as the page description.
    pub fn summary(&self) -> String {
        let parts: Vec<&str> = [&self.description, &self.neighborhood, &self.address_line]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect();
        if parts.is_empty() {
            format!("Veja detalhes da loja {} no Guia Brechó.", self.name)
        } else {
            parts.join(" • ")
        }
    }
}

/// Rating label: average with review count when both exist, whichever exists otherwise.
pub fn format_rating(rating: Option<f64>, review_count: Option<u64>) -> String {
    match (rating, review_count) {
        (None, None) => "Sem avaliações ainda".to_string(),
        (Some(rating), Some(count)) => format!("{rating:.1} ({count} avaliações)"),
        (Some(rating), None) => format!("{rating:.1} estrelas"),
        (None, Some(count)) => format!("{count} avaliações"),
    }
}

/// `tel:` link keeping only digits and `+`; falls back to the raw value when nothing is left.
pub fn phone_href(phone: &str) -> String {
    let normalized: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if normalized.is_empty() {
        format!("tel:{phone}")
    } else {
        format!("tel:{normalized}")
    }
}

/// `wa.me` link for the digits in `whatsapp`, or `#` when there are none.
pub fn whatsapp_href(whatsapp: &str) -> String {
    let digits: String = whatsapp.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        "#".to_string()
    } else {
        format!("https://wa.me/{digits}")
    }
}

/// Profile link for an Instagram handle or URL, or `#` when blank.
pub fn instagram_href(instagram: &str) -> String {
    let trimmed = instagram.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return trimmed.to_string();
    }
    let username: String = trimmed
        .strip_prefix('@')
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if username.is_empty() {
        "#".to_string()
    } else {
        format!("{INSTAGRAM_BASE_URL}{username}")
    }
}
