//! The draft record: the single editable entity of the builder.
//!
//! A [`DraftRecord`] is edited field-by-field across the editor sections and
//! persisted whole inside the owning user's row. The wire form is
//! [`PartialDraftRecord`] (every field optional) so rows written by older
//! builds load cleanly; [`merge_defaults`] is the single reviewable artifact
//! deciding which fields have which defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::comment::Comment;

/// Maximum number of screenshots a record may hold.
///
/// Enforced only at the add action, not as a standing invariant: a row
/// written directly to the store can exceed it and will load unchanged.
pub const MAX_SCREENSHOTS: usize = 6;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a record.
///
/// `Active` is carried for wire compatibility with existing rows; no
/// operation in this workspace constructs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecordStatus {
    Draft,
    Stopped,
    Active,
}

/// Icon of the listing: either a symbolic color swatch or an uploaded
/// image payload (a data URL, opaque to this crate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Icon {
    Swatch(String),
    Image(String),
}

/// Geo-cloaking mode: show the listing to all visitors, or only to
/// visitors from the geos in [`DraftRecord::geo_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GeoMode {
    All,
    Specific,
}

/// HTTP method for an outbound postback call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Conversion events that can fire an outbound postback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PostbackEvent {
    Install,
    Open,
    PushSubscribe,
    Registration,
    Deposit,
}

impl PostbackEvent {
    /// All events, in display order.
    pub const ALL: [PostbackEvent; 5] = [
        PostbackEvent::Install,
        PostbackEvent::Open,
        PostbackEvent::PushSubscribe,
        PostbackEvent::Registration,
        PostbackEvent::Deposit,
    ];
}

/// Outbound callback configuration for one conversion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostbackConfig {
    pub url: String,
    pub method: HttpMethod,
}

impl Default for PostbackConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: HttpMethod::Get,
        }
    }
}

/// Supported analytics pixel providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PixelProvider {
    Facebook,
    Tiktok,
    Google,
    Propush,
}

impl PixelProvider {
    /// All providers, in display order.
    pub const ALL: [PixelProvider; 4] = [
        PixelProvider::Facebook,
        PixelProvider::Tiktok,
        PixelProvider::Google,
        PixelProvider::Propush,
    ];
}

/// Per-provider pixel configuration: an enabled flag plus the
/// provider-specific id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PixelConfig {
    pub enabled: bool,
    pub value: String,
}

// ---------------------------------------------------------------------------
// DraftRecord
// ---------------------------------------------------------------------------

/// The single editable entity representing one configured listing page.
///
/// `id` is immutable once created. Everything else is replaced atomically
/// by editor operations; no validation happens at this layer (ratings are
/// not clamped, URLs are not checked).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DraftRecord {
    // --- identity ---
    pub id: String,
    pub status: RecordStatus,

    // --- presentation ---
    pub name: String,
    pub developer: String,
    pub category: String,
    pub age_rating: String,
    pub size_label: String,
    pub downloads_label: String,
    pub icon: Icon,
    pub screenshots: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,

    // --- reputation ---
    pub rating: f64,
    /// Percentage distribution by star level: index 0 = 5 stars … index 4 =
    /// 1 star. Values 0–100, not required to sum to 100.
    pub rating_distribution: [u8; 5],
    pub reviews_label: String,
    pub comments: Vec<Comment>,

    // --- routing ---
    pub domain: Option<String>,
    pub offer_url: String,
    pub pass_params: bool,
    pub geo_mode: GeoMode,
    pub geo_list: Vec<String>,
    pub android_only: bool,
    pub whitepage_enabled: bool,

    // --- integrations ---
    pub postbacks: BTreeMap<PostbackEvent, PostbackConfig>,
    pub pixels: BTreeMap<PixelProvider, PixelConfig>,

    // --- misc flags ---
    pub push_prompt_enabled: bool,
    pub rich_install_ui: bool,
    pub auto_theme: bool,
}

/// Generate a fresh record id.
pub fn new_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// The full postback table with every event present and unconfigured.
fn default_postbacks() -> BTreeMap<PostbackEvent, PostbackConfig> {
    PostbackEvent::ALL
        .into_iter()
        .map(|ev| (ev, PostbackConfig::default()))
        .collect()
}

/// The full pixel table with every provider present and disabled.
fn default_pixels() -> BTreeMap<PixelProvider, PixelConfig> {
    PixelProvider::ALL
        .into_iter()
        .map(|p| (p, PixelConfig::default()))
        .collect()
}

impl Default for DraftRecord {
    /// The documented default-value table for a freshly created record.
    ///
    /// `id` defaults to empty; [`merge_defaults`] generates one when the
    /// partial carries none.
    fn default() -> Self {
        Self {
            id: String::new(),
            status: RecordStatus::Draft,

            name: "New Application".to_string(),
            developer: String::new(),
            category: "Games".to_string(),
            age_rating: "18+".to_string(),
            size_label: "15 MB".to_string(),
            downloads_label: "10,000+".to_string(),
            icon: Icon::Swatch("#4285f4".to_string()),
            screenshots: Vec::new(),
            description: String::new(),
            tags: Vec::new(),

            rating: 4.8,
            rating_distribution: [70, 20, 5, 3, 2],
            reviews_label: "12K".to_string(),
            comments: Vec::new(),

            domain: None,
            offer_url: String::new(),
            pass_params: true,
            geo_mode: GeoMode::All,
            geo_list: Vec::new(),
            android_only: false,
            whitepage_enabled: false,

            postbacks: default_postbacks(),
            pixels: default_pixels(),

            push_prompt_enabled: true,
            rich_install_ui: true,
            auto_theme: false,
        }
    }
}

// ---------------------------------------------------------------------------
// PartialDraftRecord + merge
// ---------------------------------------------------------------------------

/// Wire form of [`DraftRecord`]: every field optional, unknown fields
/// ignored, so rows written by any prior build deserialize cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PartialDraftRecord {
    pub id: Option<String>,
    pub status: Option<RecordStatus>,

    pub name: Option<String>,
    pub developer: Option<String>,
    pub category: Option<String>,
    pub age_rating: Option<String>,
    pub size_label: Option<String>,
    pub downloads_label: Option<String>,
    pub icon: Option<Icon>,
    pub screenshots: Option<Vec<String>>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,

    pub rating: Option<f64>,
    pub rating_distribution: Option<[u8; 5]>,
    pub reviews_label: Option<String>,
    pub comments: Option<Vec<Comment>>,

    pub domain: Option<String>,
    pub offer_url: Option<String>,
    pub pass_params: Option<bool>,
    pub geo_mode: Option<GeoMode>,
    pub geo_list: Option<Vec<String>>,
    pub android_only: Option<bool>,
    pub whitepage_enabled: Option<bool>,

    pub postbacks: Option<BTreeMap<PostbackEvent, PostbackConfig>>,
    pub pixels: Option<BTreeMap<PixelProvider, PixelConfig>>,

    pub push_prompt_enabled: Option<bool>,
    pub rich_install_ui: Option<bool>,
    pub auto_theme: Option<bool>,
}

impl From<DraftRecord> for PartialDraftRecord {
    fn from(r: DraftRecord) -> Self {
        Self {
            id: Some(r.id),
            status: Some(r.status),
            name: Some(r.name),
            developer: Some(r.developer),
            category: Some(r.category),
            age_rating: Some(r.age_rating),
            size_label: Some(r.size_label),
            downloads_label: Some(r.downloads_label),
            icon: Some(r.icon),
            screenshots: Some(r.screenshots),
            description: Some(r.description),
            tags: Some(r.tags),
            rating: Some(r.rating),
            rating_distribution: Some(r.rating_distribution),
            reviews_label: Some(r.reviews_label),
            comments: Some(r.comments),
            domain: r.domain,
            offer_url: Some(r.offer_url),
            pass_params: Some(r.pass_params),
            geo_mode: Some(r.geo_mode),
            geo_list: Some(r.geo_list),
            android_only: Some(r.android_only),
            whitepage_enabled: Some(r.whitepage_enabled),
            postbacks: Some(r.postbacks),
            pixels: Some(r.pixels),
            push_prompt_enabled: Some(r.push_prompt_enabled),
            rich_install_ui: Some(r.rich_install_ui),
            auto_theme: Some(r.auto_theme),
        }
    }
}

/// Merge a partial record over the default-value table.
///
/// Supplied fields win; absent fields fall back to [`DraftRecord::default`].
/// A partial with no id gets a freshly generated one. Postback and pixel
/// tables are merged per key, so a row missing a newly added provider still
/// ends up with the complete table.
pub fn merge_defaults(partial: PartialDraftRecord) -> DraftRecord {
    let d = DraftRecord::default();

    let mut postbacks = default_postbacks();
    if let Some(supplied) = partial.postbacks {
        postbacks.extend(supplied);
    }

    let mut pixels = default_pixels();
    if let Some(supplied) = partial.pixels {
        pixels.extend(supplied);
    }

    DraftRecord {
        id: partial.id.unwrap_or_else(new_record_id),
        status: partial.status.unwrap_or(d.status),

        name: partial.name.unwrap_or(d.name),
        developer: partial.developer.unwrap_or(d.developer),
        category: partial.category.unwrap_or(d.category),
        age_rating: partial.age_rating.unwrap_or(d.age_rating),
        size_label: partial.size_label.unwrap_or(d.size_label),
        downloads_label: partial.downloads_label.unwrap_or(d.downloads_label),
        icon: partial.icon.unwrap_or(d.icon),
        screenshots: partial.screenshots.unwrap_or(d.screenshots),
        description: partial.description.unwrap_or(d.description),
        tags: partial.tags.unwrap_or(d.tags),

        rating: partial.rating.unwrap_or(d.rating),
        rating_distribution: partial.rating_distribution.unwrap_or(d.rating_distribution),
        reviews_label: partial.reviews_label.unwrap_or(d.reviews_label),
        comments: partial.comments.unwrap_or(d.comments),

        // `domain` is optional in the full record too: absent means unset.
        domain: partial.domain,
        offer_url: partial.offer_url.unwrap_or(d.offer_url),
        pass_params: partial.pass_params.unwrap_or(d.pass_params),
        geo_mode: partial.geo_mode.unwrap_or(d.geo_mode),
        geo_list: partial.geo_list.unwrap_or(d.geo_list),
        android_only: partial.android_only.unwrap_or(d.android_only),
        whitepage_enabled: partial.whitepage_enabled.unwrap_or(d.whitepage_enabled),

        postbacks,
        pixels,

        push_prompt_enabled: partial.push_prompt_enabled.unwrap_or(d.push_prompt_enabled),
        rich_install_ui: partial.rich_install_ui.unwrap_or(d.rich_install_ui),
        auto_theme: partial.auto_theme.unwrap_or(d.auto_theme),
    }
}

impl DraftRecord {
    /// A brand-new record: defaults plus a generated id.
    pub fn create() -> Self {
        Self {
            id: new_record_id(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_empty_partial_yields_defaults_with_generated_id() {
        let merged = merge_defaults(PartialDraftRecord::default());
        let defaults = DraftRecord::default();

        assert!(!merged.id.is_empty());
        assert_eq!(merged.status, defaults.status);
        assert_eq!(merged.name, defaults.name);
        assert_eq!(merged.icon, defaults.icon);
        assert_eq!(merged.rating, defaults.rating);
        assert_eq!(merged.rating_distribution, defaults.rating_distribution);
        assert_eq!(merged.domain, None);
        assert_eq!(merged.postbacks, defaults.postbacks);
        assert_eq!(merged.pixels, defaults.pixels);
        assert!(merged.push_prompt_enabled);
        assert!(merged.rich_install_ui);
        assert!(!merged.auto_theme);
    }

    #[test]
    fn merge_supplied_fields_win_over_defaults() {
        let partial = PartialDraftRecord {
            id: Some("rec-1".to_string()),
            name: Some("Lucky Wheel".to_string()),
            rating: Some(3.2),
            domain: Some("example.com".to_string()),
            auto_theme: Some(true),
            ..Default::default()
        };

        let merged = merge_defaults(partial);
        assert_eq!(merged.id, "rec-1");
        assert_eq!(merged.name, "Lucky Wheel");
        assert_eq!(merged.rating, 3.2);
        assert_eq!(merged.domain.as_deref(), Some("example.com"));
        assert!(merged.auto_theme);
        // Everything untouched stays at its default.
        assert_eq!(merged.category, "Games");
        assert_eq!(merged.downloads_label, "10,000+");
    }

    #[test]
    fn merge_fills_in_missing_pixel_providers() {
        let mut pixels = BTreeMap::new();
        pixels.insert(
            PixelProvider::Facebook,
            PixelConfig {
                enabled: true,
                value: "fb-123".to_string(),
            },
        );

        let merged = merge_defaults(PartialDraftRecord {
            pixels: Some(pixels),
            ..Default::default()
        });

        assert_eq!(merged.pixels.len(), PixelProvider::ALL.len());
        assert!(merged.pixels[&PixelProvider::Facebook].enabled);
        assert_eq!(merged.pixels[&PixelProvider::Facebook].value, "fb-123");
        assert!(!merged.pixels[&PixelProvider::Tiktok].enabled);
    }

    #[test]
    fn merge_fills_in_missing_postback_events() {
        let mut postbacks = BTreeMap::new();
        postbacks.insert(
            PostbackEvent::Deposit,
            PostbackConfig {
                url: "https://t.example/pb".to_string(),
                method: HttpMethod::Post,
            },
        );

        let merged = merge_defaults(PartialDraftRecord {
            postbacks: Some(postbacks),
            ..Default::default()
        });

        assert_eq!(merged.postbacks.len(), PostbackEvent::ALL.len());
        assert_eq!(
            merged.postbacks[&PostbackEvent::Deposit].method,
            HttpMethod::Post
        );
        assert_eq!(merged.postbacks[&PostbackEvent::Install].url, "");
    }

    #[test]
    fn create_generates_distinct_ids() {
        let a = DraftRecord::create();
        let b = DraftRecord::create();
        assert_ne!(a.id, b.id);
        assert_eq!(a.status, RecordStatus::Draft);
    }

    #[test]
    fn partial_round_trips_through_full_record() {
        let mut record = DraftRecord::create();
        record.domain = Some("example.com".to_string());
        record.tags = vec!["casino".to_string(), "slots".to_string()];

        let partial = PartialDraftRecord::from(record.clone());
        let merged = merge_defaults(partial);
        assert_eq!(merged, record);
    }

    #[test]
    fn old_row_with_unknown_and_missing_fields_deserializes() {
        // A row written by an older build: missing most fields, plus one
        // field this build no longer knows about.
        let json = r#"{"id":"rec-9","name":"Old App","legacy_field":42}"#;
        let partial: PartialDraftRecord = serde_json::from_str(json).unwrap();
        let merged = merge_defaults(partial);

        assert_eq!(merged.id, "rec-9");
        assert_eq!(merged.name, "Old App");
        assert_eq!(merged.status, RecordStatus::Draft);
    }
}
