//! Song catalogue types

use super::SongId;
use serde::{Deserialize, Serialize};

/// Song in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub year: i32,
    pub performer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
}

/// Data for creating a new song
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSong {
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: Option<String>,
    pub duration: Option<i32>,
}

/// Song as listed inside a playlist or the catalogue.
///
/// This is also the shape stored in the songs-in-playlist cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    pub id: SongId,
    pub title: String,
    pub performer: String,
}

impl From<Song> for SongSummary {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            title: song.title,
            performer: song.performer,
        }
    }
}
