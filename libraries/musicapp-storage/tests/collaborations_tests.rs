//! Integration tests for collaboration grants


use musicapp_core::MusicError;
use musicapp_storage::collaborations;
use test_helpers::*;

#[tokio::test]
async fn test_add_and_delete_collaboration() {
    let Some(test_db) = TestDb::new().await else {
        return;
    };
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let id = create_test_playlist(pool, "Road Trip", &alice).await;

    let grant = collaborations::add(pool, &id, &bob).await.unwrap();
    assert!(grant.as_str().starts_with("collab-"));
    assert_eq!(
        collaborations::get_collaborator_ids(pool, &id).await.unwrap(),
        vec![bob.clone()]
    );

    collaborations::delete(pool, &id, &bob).await.unwrap();
    assert!(collaborations::get_collaborator_ids(pool, &id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_delete_missing_collaboration_is_invariant_failure() {
    let Some(test_db) = TestDb::new().await else {
        return;
    };
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let id = create_test_playlist(pool, "Road Trip", &alice).await;

    let err = collaborations::delete(pool, &id, &bob).await.unwrap_err();
    assert!(matches!(err, MusicError::Invariant(_)));
}

#[tokio::test]
async fn test_duplicate_collaboration_is_rejected() {
    let Some(test_db) = TestDb::new().await else {
        return;
    };
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let id = create_test_playlist(pool, "Road Trip", &alice).await;

    collaborations::add(pool, &id, &bob).await.unwrap();
    let err = collaborations::add(pool, &id, &bob).await.unwrap_err();
    assert!(matches!(err, MusicError::Duplicate(_)));
}
