//! YouTube URL handling: video id extraction and derived media URLs.
//!
//! The id extracted here is the only thing that makes a submitted URL
//! acceptable; an article is never created when [`extract_video_id`] fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Length of a canonical YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

/// Recognised URL prefixes followed by the candidate id.
///
/// The leading `.*` is greedy, so when several prefixes appear the last one
/// wins. The candidate runs up to the first `#`, `&` or `?`.
const VIDEO_URL_PATTERN: &str = r"^.*(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*$";

static VIDEO_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VIDEO_URL_PATTERN).expect("valid regex"));

const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";
const EMBED_BASE: &str = "https://www.youtube.com/embed";

/// Available thumbnail resolutions, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailQuality {
    /// 1280x720, not generated for every upload.
    MaxRes,
    /// 480x360, always present.
    High,
}

impl ThumbnailQuality {
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::MaxRes => "maxresdefault",
            Self::High => "hqdefault",
        }
    }
}

/// Extract the 11-character video id from a YouTube URL.
///
/// Accepts `watch?v=ID`, `&v=ID`, `youtu.be/ID`, `/v/ID`, `/u/<c>/ID` and
/// `/embed/ID` forms. The captured id must be exactly 11 characters from
/// `[A-Za-z0-9_-]`.
pub fn extract_video_id(url: &str) -> Result<String, CoreError> {
    let candidate = VIDEO_URL_RE
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| CoreError::InvalidSourceUrl(url.to_string()))?;

    if is_valid_video_id(candidate) {
        Ok(candidate.to_string())
    } else {
        Err(CoreError::InvalidSourceUrl(url.to_string()))
    }
}

/// Returns `true` if `id` is exactly 11 characters of `[A-Za-z0-9_-]`.
pub fn is_valid_video_id(id: &str) -> bool {
    id.len() == VIDEO_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Thumbnail image URL for a video at the requested resolution.
pub fn thumbnail_url(video_id: &str, quality: ThumbnailQuality) -> String {
    format!("{THUMBNAIL_BASE}/{video_id}/{}.jpg", quality.file_stem())
}

/// Lower-resolution replacement for a max-res thumbnail URL.
///
/// Returns `None` when the URL is not a max-res thumbnail. Clients use this
/// when the preferred image fails to load; the result is never persisted.
pub fn fallback_thumbnail_url(url: &str) -> Option<String> {
    let preferred = ThumbnailQuality::MaxRes.file_stem();
    url.contains(preferred)
        .then(|| url.replace(preferred, ThumbnailQuality::High.file_stem()))
}

/// Embeddable player URL for a video.
pub fn embed_url(video_id: &str) -> String {
    format!("{EMBED_BASE}/{video_id}")
}
