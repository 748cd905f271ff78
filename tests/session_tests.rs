//! SessionStore integration tests
//!
//! Recovery, login, registration and logout against the in-memory FakeApi.

mod common;

use std::sync::Arc;

use common::{EMAIL, Endpoint, FakeApi, PASSWORD, TOKEN, empty_store, logged_in_store};
use linkkeep::client::{SessionPhase, SessionStore};
use linkkeep::errors::LinkKeepError;
use linkkeep::storage::{CredentialStore, MemoryCredentialStore};

fn assert_consistent(session: &SessionStore) {
    let snapshot = session.snapshot();
    assert_eq!(
        snapshot.phase == SessionPhase::Authenticated,
        snapshot.user.is_some(),
        "authenticated phase and user presence diverged: {:?}",
        snapshot
    );
}

// =============================================================================
// Recovery
// =============================================================================

#[tokio::test]
async fn test_new_session_is_loading_until_recovered() {
    let creds = empty_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::new(api.clone(), creds);

    assert_eq!(session.phase(), SessionPhase::Unknown);
    assert!(session.is_loading());
    assert!(!session.is_authenticated());
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn test_recover_without_credential_is_anonymous_without_request() {
    let creds = empty_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), creds).await;

    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert!(!session.is_loading());
    assert_eq!(api.calls(), 0);
    assert_consistent(&session);
}

#[tokio::test]
async fn test_recover_with_valid_credential_restores_user() {
    let creds = logged_in_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), creds).await;

    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_eq!(session.user(), Some(FakeApi::user()));
    assert_consistent(&session);
}

#[tokio::test]
async fn test_recover_with_rejected_credential_logs_out() {
    let creds: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::with_token("expired"));
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), Arc::clone(&creds)).await;

    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert!(session.user().is_none());
    assert_eq!(creds.load().unwrap(), None);
    assert_eq!(api.current_user_calls(), 1);
}

#[tokio::test]
async fn test_recover_server_error_logs_out_without_retry() {
    let creds = logged_in_store();
    let api = FakeApi::new(Arc::clone(&creds));
    api.fail(Endpoint::CurrentUser, 500, None);
    let session = SessionStore::open(api.clone(), Arc::clone(&creds)).await;

    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert_eq!(creds.load().unwrap(), None);
    assert_eq!(api.current_user_calls(), 1);
}

#[tokio::test]
async fn test_recover_runs_only_once() {
    let creds = logged_in_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::new(api.clone(), creds);

    session.recover().await;
    session.recover().await;
    session.recover().await;

    assert_eq!(api.current_user_calls(), 1);
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_is_loading_while_current_user_in_flight() {
    let creds = logged_in_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let release = api.hold(Endpoint::CurrentUser);
    let session = Arc::new(SessionStore::new(api.clone(), creds));
    let mut rx = session.subscribe();

    let task = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.recover().await })
    };

    rx.wait_for(|s| s.phase == SessionPhase::Recovering)
        .await
        .unwrap();
    assert!(session.is_loading());
    assert!(!session.is_authenticated());
    assert_consistent(&session);

    release.notify_one();
    task.await.unwrap();

    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert!(!session.is_loading());
}

// =============================================================================
// Login / Register
// =============================================================================

#[tokio::test]
async fn test_is_submitting_while_login_in_flight() {
    let creds = empty_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let release = api.hold(Endpoint::Login);
    let session = Arc::new(SessionStore::open(api.clone(), creds).await);
    let mut rx = session.subscribe();

    let task = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.login(EMAIL, PASSWORD).await })
    };

    rx.wait_for(|s| s.submitting).await.unwrap();
    assert!(session.is_submitting());
    assert_eq!(session.phase(), SessionPhase::Anonymous);

    release.notify_one();
    task.await.unwrap().unwrap();

    assert!(!session.is_submitting());
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_failed_login_keeps_existing_session() {
    let creds = logged_in_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), Arc::clone(&creds)).await;
    assert!(session.is_authenticated());

    let failure = session.login(EMAIL, "wrong").await.unwrap_err();

    assert_eq!(failure.message, "Invalid credentials");
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_eq!(session.user(), Some(FakeApi::user()));
    assert_eq!(creds.load().unwrap().as_deref(), Some(TOKEN));
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn test_login_persists_credential_and_sets_user() {
    let creds = empty_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), Arc::clone(&creds)).await;

    let user = session.login(EMAIL, PASSWORD).await.unwrap();

    assert_eq!(user.email, EMAIL);
    assert_eq!(creds.load().unwrap().as_deref(), Some(TOKEN));
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert!(!session.is_submitting());
    assert_consistent(&session);
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message_and_keeps_state() {
    let creds = empty_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), Arc::clone(&creds)).await;

    let failure = session.login(EMAIL, "wrong").await.unwrap_err();

    assert_eq!(failure.message, "Invalid credentials");
    assert!(matches!(
        failure.error,
        LinkKeepError::Request { status: 400, .. }
    ));
    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert_eq!(creds.load().unwrap(), None);
    assert!(!session.is_submitting());
    assert_consistent(&session);
}

#[tokio::test]
async fn test_register_logs_in_new_user() {
    let creds = empty_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), Arc::clone(&creds)).await;

    let user = session
        .register("grace", "grace@example.com", "hunter22")
        .await
        .unwrap();

    assert_eq!(user.username, "grace");
    assert_eq!(session.user().map(|u| u.email), Some("grace@example.com".to_string()));
    assert_eq!(creds.load().unwrap().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_register_existing_email_fails() {
    let creds = empty_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), creds).await;

    let failure = session.register("ada", EMAIL, "whatever").await.unwrap_err();
    assert_eq!(failure.message, "User already exists");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_register_password_mismatch_sends_nothing() {
    let creds = empty_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), creds).await;

    let failure = session
        .register_confirmed("grace", "grace@example.com", "hunter22", "hunter23")
        .await
        .unwrap_err();

    assert!(failure.is_validation());
    assert_eq!(failure.message, "Passwords do not match");
    assert_eq!(api.calls(), 0);
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_is_local_and_clears_credential() {
    let creds = logged_in_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api.clone(), Arc::clone(&creds)).await;
    assert!(session.is_authenticated());
    let calls_before = api.calls();

    session.logout();

    assert_eq!(api.calls(), calls_before);
    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert!(session.user().is_none());
    assert_eq!(creds.load().unwrap(), None);
    assert_consistent(&session);
}

#[tokio::test]
async fn test_subscribers_observe_logout() {
    let creds = logged_in_store();
    let api = FakeApi::new(Arc::clone(&creds));
    let session = SessionStore::open(api, creds).await;
    let mut rx = session.subscribe();

    session.logout();

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().phase, SessionPhase::Anonymous);
}
