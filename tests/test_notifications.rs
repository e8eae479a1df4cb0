use notification_service::domain::entities::NewNotification;
use notification_service::domain::errors::DomainError;
use notification_service::domain::ports::notification_repository::NotificationRepository;
use notification_service::NotificationService;
use std::sync::Arc;

mod helpers;
use helpers::*;

fn service(db: &notification_service::infrastructure::persistence::Database) -> NotificationService {
    NotificationService::new(Arc::new(db.clone()))
}

#[tokio::test]
async fn test_save_assigns_id_and_defaults() {
    let db = setup_test_db().await;

    let saved = db
        .save(&NewNotification::new(1, "Test Title", "Test Message"))
        .await
        .unwrap();

    assert!(saved.id > 0);
    assert_eq!(saved.user_id, 1);
    assert_eq!(saved.title, "Test Title");
    assert_eq!(saved.message, "Test Message");
    assert!(!saved.read);

    let found = db.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(found, saved);
}

#[tokio::test]
async fn test_find_by_id_missing_returns_none() {
    let db = setup_test_db().await;
    assert!(db.find_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_by_user_only_returns_that_user() {
    let db = setup_test_db().await;
    let service = service(&db);

    let first = service
        .create(NewNotification::new(1, "First", "one"))
        .await
        .unwrap();
    service
        .create(NewNotification::new(2, "Other", "two"))
        .await
        .unwrap();
    let second = service
        .create(NewNotification::new(1, "Second", "three"))
        .await
        .unwrap();

    let listed = service.list_by_user(1).await.unwrap();
    assert_eq!(
        listed.iter().map(|n| n.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
    assert!(service.list_by_user(3).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unread_filter() {
    let db = setup_test_db().await;
    let service = service(&db);

    let read = service
        .create(NewNotification::new(1, "Read me", "a"))
        .await
        .unwrap();
    let unread = service
        .create(NewNotification::new(1, "Leave me", "b"))
        .await
        .unwrap();
    service.mark_as_read(read.id).await.unwrap();

    let listed = service.list_unread_by_user(1).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, unread.id);
    assert!(!listed[0].read);
}

#[tokio::test]
async fn test_mark_as_read_is_idempotent() {
    let db = setup_test_db().await;
    let service = service(&db);

    let created = service
        .create(NewNotification::new(1, "Title", "Body"))
        .await
        .unwrap();

    let once = service.mark_as_read(created.id).await.unwrap();
    let twice = service.mark_as_read(created.id).await.unwrap();

    assert!(once.read);
    assert!(twice.read);
    assert_eq!(once.created_at, created.created_at);
    assert_eq!(twice.title, "Title");

    let stored = db.find_by_id(created.id).await.unwrap().unwrap();
    assert!(stored.read);
}

#[tokio::test]
async fn test_mark_as_read_unknown_id() {
    let db = setup_test_db().await;

    let err = service(&db).mark_as_read(4242).await.unwrap_err();
    match err {
        DomainError::NotFound(msg) => assert!(msg.contains("4242"), "message was {}", msg),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_by_user_leaves_other_users() {
    let db = setup_test_db().await;
    let service = service(&db);

    for title in ["a", "b"] {
        service
            .create(NewNotification::new(1, title, "x"))
            .await
            .unwrap();
    }
    service
        .create(NewNotification::new(2, "keep", "x"))
        .await
        .unwrap();

    assert_eq!(service.delete_by_user(1).await.unwrap(), 2);
    assert!(service.list_by_user(1).await.unwrap().is_empty());
    assert_eq!(service.list_by_user(2).await.unwrap().len(), 1);

    // Nothing left to delete
    assert_eq!(service.delete_by_user(1).await.unwrap(), 0);
}
