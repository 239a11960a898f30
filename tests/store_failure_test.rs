//! Error classification when the store misbehaves, using the scripted mock.

use user_store::handlers::{handle, ApiRequest};
use user_store::model::User;
use user_store::store::mock::{MockStore, StoreCall};
use user_store::store::{marshal_item, AttributeValue, Item, Key, PutCondition, StoreError};
use user_store::users::{create_user, delete_user, fetch_user, fetch_users, update_user, UserError};

fn backend() -> StoreError {
    StoreError::Backend("connection reset".into())
}

fn stored(user: &User) -> Item {
    marshal_item(user).unwrap()
}

#[tokio::test]
async fn test_fetch_failures_are_classified() {
    let mock = MockStore::new();
    mock.expect_get().return_err(backend());
    assert_eq!(fetch_user("a@b.co", "users", &mock).await, Err(UserError::FetchFailed));

    let mut malformed = Item::new();
    malformed.insert("email".into(), AttributeValue::L(vec![]));
    mock.expect_get().return_ok(Some(malformed.clone()));
    assert_eq!(
        fetch_user("a@b.co", "users", &mock).await,
        Err(UserError::UnmarshalFailed)
    );

    mock.expect_scan().return_err(backend());
    assert_eq!(fetch_users("users", &mock).await, Err(UserError::FetchFailed));

    mock.expect_scan()
        .return_ok(vec![stored(&User::new("a@b.co", "A", "B")), malformed]);
    assert_eq!(fetch_users("users", &mock).await, Err(UserError::UnmarshalFailed));

    mock.verify();
}

#[tokio::test]
async fn test_create_reports_existing_user() {
    let mock = MockStore::new();
    mock.expect_get()
        .return_ok(Some(stored(&User::new("a@b.co", "A", "B"))));

    let result = create_user(r#"{"email":"a@b.co"}"#, "users", &mock).await;
    assert_eq!(result, Err(UserError::UserAlreadyExists));
    assert!(!mock.calls().iter().any(StoreCall::is_write));
    mock.verify();
}

#[tokio::test]
async fn test_create_proceeds_when_existence_check_fails() {
    let mock = MockStore::new();
    mock.expect_get().return_err(backend());
    mock.expect_put().return_ok(());

    let created = create_user(r#"{"email":"a@b.co","firstName":"A"}"#, "users", &mock)
        .await
        .expect("A failed existence check should not block creation");
    assert_eq!(created, User::new("a@b.co", "A", ""));
    mock.verify();
}

#[tokio::test]
async fn test_conditional_put_catches_duplicate_after_failed_check() {
    let mock = MockStore::new();
    mock.expect_get().return_err(backend());
    mock.expect_put()
        .return_err(StoreError::ConditionFailed("email=a@b.co".into()));

    let result = create_user(r#"{"email":"a@b.co"}"#, "users", &mock).await;
    assert_eq!(result, Err(UserError::UserAlreadyExists));
    mock.verify();
}

#[tokio::test]
async fn test_put_failure_is_classified() {
    let mock = MockStore::new();
    mock.expect_get().return_ok(None);
    mock.expect_put().return_err(backend());
    let result = create_user(r#"{"email":"a@b.co"}"#, "users", &mock).await;
    assert_eq!(result, Err(UserError::PutFailed));

    mock.expect_get()
        .return_ok(Some(stored(&User::new("a@b.co", "", ""))));
    mock.expect_put().return_err(backend());
    let result = update_user(r#"{"email":"a@b.co"}"#, "users", &mock).await;
    assert_eq!(result, Err(UserError::PutFailed));

    mock.verify();
}

#[tokio::test]
async fn test_update_writes_full_record_if_present() {
    let mock = MockStore::new();
    mock.expect_get()
        .return_ok(Some(stored(&User::new("a@b.co", "A", "B"))));
    mock.expect_put().return_ok(());

    let updated = update_user(r#"{"email":"a@b.co","firstName":"Z"}"#, "users", &mock)
        .await
        .unwrap();
    assert_eq!(updated, User::new("a@b.co", "Z", ""));

    let calls = mock.calls();
    assert_eq!(
        calls[1],
        StoreCall::Put {
            table: "users".into(),
            item: stored(&User::new("a@b.co", "Z", "")),
            condition: PutCondition::IfPresent,
        }
    );
    mock.verify();
}

#[tokio::test]
async fn test_update_does_not_validate_email() {
    let mock = MockStore::new();
    mock.expect_get()
        .return_ok(Some(stored(&User::new("legacy", "", ""))));
    mock.expect_put().return_ok(());

    let updated = update_user(r#"{"email":"legacy"}"#, "users", &mock).await;
    assert!(updated.is_ok());
    mock.verify();
}

#[tokio::test]
async fn test_update_conditional_put_catches_concurrent_delete() {
    let mock = MockStore::new();
    mock.expect_get()
        .return_ok(Some(stored(&User::new("a@b.co", "", ""))));
    mock.expect_put()
        .return_err(StoreError::ConditionFailed("email=a@b.co".into()));

    let result = update_user(r#"{"email":"a@b.co"}"#, "users", &mock).await;
    assert_eq!(result, Err(UserError::UserDoesNotExist));
    mock.verify();
}

#[tokio::test]
async fn test_delete_passes_table_name() {
    let mock = MockStore::new();
    mock.expect_delete().return_ok(());
    mock.expect_delete().return_err(backend());

    delete_user("a@b.co", "people", &mock).await.unwrap();
    assert_eq!(
        delete_user("a@b.co", "people", &mock).await,
        Err(UserError::DeleteFailed)
    );

    assert_eq!(
        mock.calls()[0],
        StoreCall::Delete {
            table: "people".into(),
            key: Key::new("email", "a@b.co"),
        }
    );
    mock.verify();
}

#[tokio::test]
async fn test_store_failures_map_to_server_errors() {
    let mock = MockStore::new();
    mock.expect_scan().return_err(backend());

    let response = handle(&ApiRequest::new("GET"), "users", &mock).await;
    assert_eq!(response.status_code, 500);
    assert_eq!(response.body, r#"{"error":"failed to fetch record"}"#);
    mock.verify();
}
