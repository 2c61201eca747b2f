// src/models.rs

use serde::{Deserialize, Serialize};

// ── Shared types ──

/// A titled reference to an artist, album or song in the source collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitledRef {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
}

impl TitledRef {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
        }
    }
}

// ── Track: payload of a drop-in ──

/// Metadata carried by a dropped item. The queue never interprets it; it is
/// handed back unchanged to every event handler and to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub artist: TitledRef,
    pub album: TitledRef,
    pub song: TitledRef,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Track {
    pub fn new(artist: &str, album: &str, song: &str) -> Self {
        Self {
            artist: TitledRef::new(artist),
            album: TitledRef::new(album),
            song: TitledRef::new(song),
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, path: impl Into<String>) -> Self {
        self.thumbnail = Some(path.into());
        self
    }

    /// "Artist - Song", as shown on the drag helper.
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.artist.title, self.song.title)
    }
}
