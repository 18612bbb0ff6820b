//! Video identifier extraction.
//!
//! Accepted shapes, with or without scheme and `www.`/`m.` prefix:
//! - `youtube.com/watch?v=ID` (also `watch?list=..&v=ID`)
//! - `youtu.be/ID`
//! - `youtube.com/embed/ID`
//! - `youtube.com/v/ID`
//! - `youtube.com/shorts/ID`
//!
//! Only the scheme and host are case-insensitive. With several `v=`
//! parameters the first one wins.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of a platform video identifier.
pub const VIDEO_ID_LEN: usize = 11;

static VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:https?://)?(?i:(?:www|m)\.)?(?:(?i:youtube\.com)/(?:watch\?(?:[^#]*?&)??v=|embed/|v/|shorts/)|(?i:youtu\.be)/)([A-Za-z0-9_-]{11})(?:[?&#/]|$)",
    )
    .expect("video url pattern is valid")
});

/// A validated 11-character video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video identifier from raw user input.
pub fn extract_video_id(input: &str) -> Result<VideoId, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    VIDEO_URL
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|id| VideoId(id.as_str().to_string()))
        .ok_or(ValidationError::InvalidUrl)
}
