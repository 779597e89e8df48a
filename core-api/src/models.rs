//! Wire models for the WordPress REST API.
//!
//! These mirror the JSON shapes of `/wp-json/wp/v2/posts` (episodes) and the
//! program taxonomy endpoint, and convert into the domain models from
//! `core-library`. The conversion is lossy on purpose: the app keeps the
//! rendered HTML strings and drops everything else WordPress embeds.

use chrono::NaiveDateTime;
use core_library::models::{AudioRef, Episode, Program, DEFAULT_DURATION};
use serde::Deserialize;

/// A `{"rendered": "..."}` wrapper, used by WordPress for title, content and
/// excerpt fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// Post meta fields carrying the audio URL.
///
/// Newer posts fill `audio_url`; older ones only have the core `enclosure`
/// meta, whose value is the multiline `url\nlength\nmime` format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostMeta {
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub enclosure: Option<String>,
}

/// The `_embedded` object returned when `_embed` is requested.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    #[serde(default, rename = "wp:featuredmedia")]
    pub featured_media: Vec<FeaturedMedia>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedMedia {
    #[serde(default)]
    pub source_url: Option<String>,
}

/// An episode post as returned by `/wp-json/wp/v2/posts`.
#[derive(Debug, Clone, Deserialize)]
pub struct WpPost {
    pub id: i64,
    pub date: NaiveDateTime,
    pub slug: String,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub meta: PostMeta,
    #[serde(default, rename = "programa")]
    pub program_ids: Vec<i64>,
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<Embedded>,
}

impl WpPost {
    /// Resolve the audio reference, preferring the dedicated meta field over
    /// the legacy enclosure. Blank values count as absent.
    pub fn resolve_audio(&self) -> Option<AudioRef> {
        if let Some(url) = non_blank(self.meta.audio_url.as_deref()) {
            return Some(AudioRef::Stream(url));
        }
        // Enclosure meta packs url, byte length and mime type on separate
        // lines; only the first line matters.
        let enclosure = self.meta.enclosure.as_deref()?;
        let url = non_blank(enclosure.lines().next())?;
        Some(AudioRef::Enclosure(url))
    }

    /// The featured image URL, if one was embedded.
    pub fn image_url(&self) -> Option<String> {
        self.embedded
            .as_ref()?
            .featured_media
            .first()?
            .source_url
            .clone()
    }

    pub fn into_episode(self) -> Episode {
        let audio = self.resolve_audio();
        let image_url = self.image_url();
        Episode {
            id: self.id,
            title: self.title.rendered,
            content: self.content.rendered,
            excerpt: self.excerpt.rendered,
            slug: self.slug,
            published_at: self.date,
            audio,
            image_url,
            program_ids: self.program_ids,
            duration: DEFAULT_DURATION.to_string(),
        }
    }
}

/// A program taxonomy term.
#[derive(Debug, Clone, Deserialize)]
pub struct WpTerm {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub meta: TermMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermMeta {
    #[serde(default)]
    pub image: Option<String>,
}

impl WpTerm {
    pub fn into_program(self) -> Program {
        let description = non_blank(Some(&self.description));
        Program {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description,
            episode_count: self.count,
            image_url: self.meta.image,
        }
    }
}

/// The WordPress REST error body, e.g.
/// `{"code": "rest_post_invalid_id", "message": "Invalid post ID.", ...}`.
#[derive(Debug, Deserialize)]
pub struct WpErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
