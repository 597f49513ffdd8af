/// Data service tests
/// Every write must drop exactly the cache entries it can have made stale
mod common;

use common::{create_test_song, TestApp};
use musicapp_core::{
    cache_keys,
    types::{PlaylistId, SongId},
    MusicError,
};
use std::time::Duration;

const TTL: Duration = Duration::from_secs(60);

async fn seed(app: &TestApp, keys: &[&str]) {
    for key in keys {
        app.state.cache.set(key, "[]".to_string(), TTL).await;
    }
}

async fn cached(app: &TestApp, key: &str) -> bool {
    app.state.cache.get(key).await.is_some()
}

#[tokio::test]
async fn test_add_playlist_invalidates_owner_listing_only() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (alice, _) = app.create_user("alice").await;
    let (bob, _) = app.create_user("bob").await;

    let alice_key = cache_keys::playlists(&alice);
    let bob_key = cache_keys::playlists(&bob);
    seed(&app, &[&alice_key, &bob_key]).await;

    let id = app
        .state
        .playlists
        .add_playlist("Road Trip", &alice)
        .await
        .unwrap();
    assert!(id.as_str().starts_with("playlist-"));

    assert!(!cached(&app, &alice_key).await);
    assert!(cached(&app, &bob_key).await);

    let playlists = app.state.playlists.get_playlists(&alice).await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].username, "alice");
}

#[tokio::test]
async fn test_delete_playlist_invalidates_every_affected_entry() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (alice, _) = app.create_user("alice").await;
    let (bob, _) = app.create_user("bob").await;
    let (carol, _) = app.create_user("carol").await;

    let playlist = app
        .state
        .playlists
        .add_playlist("Road Trip", &alice)
        .await
        .unwrap();
    app.state
        .collaborations
        .add_collaboration(&playlist, &bob)
        .await
        .unwrap();

    let alice_key = cache_keys::playlists(&alice);
    let bob_key = cache_keys::playlists(&bob);
    let carol_key = cache_keys::playlists(&carol);
    let songs_key = cache_keys::playlist_songs(&playlist);
    seed(&app, &[&alice_key, &bob_key, &carol_key, &songs_key]).await;

    // Only the owner may delete
    let err = app
        .state
        .playlists
        .delete_playlist_by_id(&playlist, &bob)
        .await
        .unwrap_err();
    assert!(matches!(err, MusicError::Authorization(_)));
    assert!(cached(&app, &alice_key).await);

    app.state
        .playlists
        .delete_playlist_by_id(&playlist, &alice)
        .await
        .unwrap();

    assert!(!cached(&app, &alice_key).await);
    assert!(!cached(&app, &bob_key).await);
    assert!(!cached(&app, &songs_key).await);
    assert!(cached(&app, &carol_key).await);

    assert!(app.state.playlists.get_playlists(&bob).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_song_writes_invalidate_the_playlist_entry() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (alice, _) = app.create_user("alice").await;
    let song = SongId::new(create_test_song(app.pool(), "Fix You", "Coldplay").await);
    let playlist = app
        .state
        .playlists
        .add_playlist("Road Trip", &alice)
        .await
        .unwrap();
    let other = PlaylistId::new("playlist-other");

    let songs_key = cache_keys::playlist_songs(&playlist);
    let other_key = cache_keys::playlist_songs(&other);
    let owner_key = cache_keys::playlists(&alice);

    seed(&app, &[&songs_key, &other_key, &owner_key]).await;
    app.state
        .playlists
        .post_song_to_playlist(&song, &playlist, &alice)
        .await
        .unwrap();
    assert!(!cached(&app, &songs_key).await);
    assert!(cached(&app, &other_key).await);
    assert!(cached(&app, &owner_key).await);

    // Duplicates are allowed and removed together
    app.state
        .playlists
        .post_song_to_playlist(&song, &playlist, &alice)
        .await
        .unwrap();
    let songs = app
        .state
        .playlists
        .get_songs_in_playlist(&playlist, &alice)
        .await
        .unwrap();
    assert_eq!(songs.len(), 2);

    seed(&app, &[&songs_key]).await;
    app.state
        .playlists
        .delete_song_in_playlist(&playlist, &song, &alice)
        .await
        .unwrap();
    assert!(!cached(&app, &songs_key).await);

    let err = app
        .state
        .playlists
        .delete_song_in_playlist(&playlist, &song, &alice)
        .await
        .unwrap_err();
    assert!(matches!(err, MusicError::NotFound { .. }));
}

#[tokio::test]
async fn test_collaboration_writes_invalidate_grantee_and_playlist() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (alice, _) = app.create_user("alice").await;
    let (bob, _) = app.create_user("bob").await;
    let playlist = app
        .state
        .playlists
        .add_playlist("Road Trip", &alice)
        .await
        .unwrap();

    let alice_key = cache_keys::playlists(&alice);
    let bob_key = cache_keys::playlists(&bob);
    let songs_key = cache_keys::playlist_songs(&playlist);

    seed(&app, &[&alice_key, &bob_key, &songs_key]).await;
    let id = app
        .state
        .collaborations
        .add_collaboration(&playlist, &bob)
        .await
        .unwrap();
    assert!(id.as_str().starts_with("collab-"));
    assert!(!cached(&app, &bob_key).await);
    assert!(!cached(&app, &songs_key).await);
    assert!(cached(&app, &alice_key).await);

    assert!(app.state.playlists.verify_access(&playlist, &bob).await.is_ok());

    seed(&app, &[&bob_key, &songs_key]).await;
    app.state
        .collaborations
        .delete_collaboration(&playlist, &bob)
        .await
        .unwrap();
    assert!(!cached(&app, &bob_key).await);
    assert!(!cached(&app, &songs_key).await);

    let err = app
        .state
        .collaborations
        .delete_collaboration(&playlist, &bob)
        .await
        .unwrap_err();
    assert!(matches!(err, MusicError::Invariant(_)));
}
