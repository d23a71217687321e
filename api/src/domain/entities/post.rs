//! Post domain entity
//!
//! Blog posts kept in the flat-file store, plus slug derivation.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;

/// Maximum slug length in characters
pub const MAX_SLUG_LEN: usize = 80;

/// Slug used when neither slug nor title yields any characters
pub const FALLBACK_SLUG: &str = "post";

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("static slug pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static slug pattern"));
static DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("static slug pattern"));

/// A stored post
///
/// Records written by other tools are read loosely: missing or null fields
/// become empty, scalars are stringified and unknown keys are carried along.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub slug: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub title: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub content: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub image_url: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub source_name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub source_url: String,
    /// Free-form publication timestamp as supplied by the ingesting caller
    #[serde(default, deserialize_with = "loose_string")]
    pub published_at: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub created_at: String,
    /// Tags are kept as given, strings or not
    #[serde(default, deserialize_with = "loose_tags")]
    pub tags: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Build a stored post from a candidate, assigning id, slug and timestamps
    pub fn from_candidate(candidate: &PostCandidate, slug: String, now: DateTime<Utc>) -> Self {
        let created_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let published_at = candidate
            .published_at
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| created_at.clone());

        Self {
            id: generate_post_id(now),
            slug,
            title: trimmed(&candidate.title),
            summary: trimmed(&candidate.summary),
            content: trimmed(&candidate.content),
            image_url: trimmed(&candidate.image_url),
            source_name: trimmed(&candidate.source_name),
            source_url: candidate.normalized_source_url().unwrap_or_default(),
            published_at,
            created_at,
            tags: candidate.tags.clone().unwrap_or_default(),
            extra: Map::new(),
        }
    }

    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            image_url: self.image_url.clone(),
            published_at: self.published_at.clone(),
        }
    }
}

/// Incoming post data; every field is optional
///
/// Scalars are accepted where text is expected, and `tags` is ignored unless it
/// is an array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCandidate {
    #[serde(default, deserialize_with = "loose_opt_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "loose_opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_opt_string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "loose_opt_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "loose_opt_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "loose_opt_string")]
    pub source_name: Option<String>,
    #[serde(default, deserialize_with = "loose_opt_string")]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "loose_opt_string")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "loose_opt_tags")]
    pub tags: Option<Vec<Value>>,
}

impl PostCandidate {
    /// Source URL used for deduplication, `None` when blank
    pub fn normalized_source_url(&self) -> Option<String> {
        self.source_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Text the slug is derived from: explicit slug first, then title
    pub fn slug_source(&self) -> &str {
        self.slug
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.title.as_deref())
            .unwrap_or("")
    }
}

/// Listing projection of a post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub image_url: String,
    pub published_at: String,
}

/// Derive a URL-safe slug: lowercase, diacritics stripped, non-alphanumerics
/// removed, whitespace hyphenated, truncated to [`MAX_SLUG_LEN`].
pub fn slugify(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();

    let cleaned = DISALLOWED.replace_all(&folded, "");
    let hyphenated = WHITESPACE.replace_all(cleaned.trim(), "-");
    let collapsed = DASHES.replace_all(&hyphenated, "-");

    collapsed.chars().take(MAX_SLUG_LEN).collect()
}

/// Disambiguate a slug against those already taken by appending `-2`, `-3`, ...
pub fn unique_slug(base: &str, existing: &HashSet<&str>) -> String {
    let base = if base.is_empty() { FALLBACK_SLUG } else { base };
    if !existing.contains(base) {
        return base.to_string();
    }

    (2u64..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !existing.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}

fn generate_post_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 6] = rng.gen();
    format!("p_{}_{}", now.timestamp_millis(), hex::encode(bytes))
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or("").to_string()
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn loose_opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn loose_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(loose_opt_tags(deserializer)?.unwrap_or_default())
}

fn loose_opt_tags<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Value>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(tags) => Ok(Some(tags)),
        _ => Ok(None),
    }
}
