mod playlist;
mod song;
mod user;

pub use crate::ids::{CollaborationId, PlaylistId, PlaylistSongId, SongId, UserId};
pub use playlist::PlaylistSummary;
pub use song::{CreateSong, Song, SongSummary};
pub use user::CreateUser;
