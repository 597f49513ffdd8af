//! Identifier generation and typed ids
//!
//! Every persisted entity is identified by `"<prefix>-<random>"`, where the
//! random part is drawn from the url-safe alphabet.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Url-safe alphabet used for the random part of identifiers
const ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Length of the random part of every generated id
pub const ID_LENGTH: usize = 16;

/// Generate `"<prefix>-<len random chars>"`.
pub fn generate_id(prefix: &str, len: usize) -> String {
    let mut rng = rand::thread_rng();
    let random: String = (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{prefix}-{random}")
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by [`Self::generate`]
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing id
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random id
            pub fn generate() -> Self {
                Self(generate_id(Self::PREFIX, ID_LENGTH))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> std::result::Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(Self(s))
            }
        }
    };
}

define_id!(
    /// User identifier
    UserId,
    "user"
);

define_id!(
    /// Song identifier
    SongId,
    "song"
);

define_id!(
    /// Playlist identifier
    PlaylistId,
    "playlist"
);

define_id!(
    /// Playlist membership row identifier
    PlaylistSongId,
    "playlistsong"
);

define_id!(
    /// Collaboration grant identifier
    CollaborationId,
    "collab"
);
