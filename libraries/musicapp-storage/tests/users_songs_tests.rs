//! Integration tests for the user and song slices


use musicapp_core::{types::*, MusicError};
use musicapp_storage::{songs, users};
use test_helpers::*;

#[tokio::test]
async fn test_user_credentials_lookup() {
    let Some(test_db) = TestDb::new().await else {
        return;
    };
    let pool = test_db.pool();

    let id = create_test_user(pool, "alice").await;
    assert!(id.as_str().starts_with("user-"));

    let (found_id, hash) = users::get_credentials(pool, "alice").await.unwrap().unwrap();
    assert_eq!(found_id, id);
    assert_eq!(hash, "not-a-real-hash");

    assert!(users::get_credentials(pool, "nobody").await.unwrap().is_none());

    assert!(users::exists(pool, &id).await.unwrap());
    assert!(!users::exists(pool, &UserId::new("user-missing")).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let Some(test_db) = TestDb::new().await else {
        return;
    };
    let pool = test_db.pool();

    create_test_user(pool, "alice").await;
    let err = users::create(
        pool,
        CreateUser {
            username: "alice".to_string(),
            password_hash: "x".to_string(),
            fullname: "Another Alice".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MusicError::Duplicate(_)));
}

#[tokio::test]
async fn test_song_catalogue() {
    let Some(test_db) = TestDb::new().await else {
        return;
    };
    let pool = test_db.pool();

    let id = songs::create(
        pool,
        CreateSong {
            title: "Viva la Vida".to_string(),
            year: 2008,
            performer: "Coldplay".to_string(),
            genre: None,
            duration: None,
        },
    )
    .await
    .unwrap();

    let song = songs::get_by_id(pool, &id).await.unwrap().unwrap();
    assert_eq!(song.title, "Viva la Vida");
    assert_eq!(song.year, 2008);
    assert_eq!(song.genre, None);

    let all = songs::get_all(pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].performer, "Coldplay");

    assert!(songs::exists(pool, &id).await.unwrap());
    assert!(songs::get_by_id(pool, &SongId::new("song-missing"))
        .await
        .unwrap()
        .is_none());
}
