use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use studio_session::errors::ClientError;
use studio_session::utils::{
    ACCESS_TOKEN_KEY, NAME_KEY, REDIRECTED_FROM_KEY, REFRESH_EXP_KEY, REFRESH_TOKEN_KEY,
};
use studio_session::SessionEvent;
use test_context::test_context;

use crate::helpers::TestContext;

#[test_context(TestContext)]
#[tokio::test]
async fn should_refresh_and_retry_expired_access_token(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.login().await;
    let old_access = app.stored(ACCESS_TOKEN_KEY).await.unwrap();
    let old_refresh = app.stored(REFRESH_TOKEN_KEY).await.unwrap();
    app.store(REFRESH_EXP_KEY, (Utc::now().timestamp() + 600).to_string())
        .await;
    app.backend.expire_access_tokens();

    let user = app.session.me().await.unwrap();

    assert_eq!(user.id, crate::helpers::USER_ID);
    assert_eq!(app.backend.refresh_calls(), 1);
    assert_eq!(
        *app.backend.presented_refresh_tokens.lock().unwrap(),
        vec![old_refresh.clone()]
    );

    let new_access = app.stored(ACCESS_TOKEN_KEY).await.unwrap();
    let new_refresh = app.stored(REFRESH_TOKEN_KEY).await.unwrap();
    assert_ne!(new_access, old_access);
    assert_ne!(new_refresh, old_refresh);
    assert_eq!(
        *app.backend.me_bearers.lock().unwrap(),
        vec![Some(old_access), Some(new_access.clone())]
    );
    assert_eq!(app.default_bearer().await, Some(new_access));
    // Display fields survive a refresh.
    assert_eq!(app.stored(NAME_KEY).await.as_deref(), Some("Kiss Réka"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_not_refresh_with_expired_refresh_token(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.login().await;
    app.store(REFRESH_EXP_KEY, (Utc::now().timestamp() - 60).to_string())
        .await;
    app.backend.expire_access_tokens();

    let result = app.session.me().await;

    match result {
        Err(e) => assert!(e.is_token_not_valid(), "unexpected error {e:?}"),
        Ok(user) => panic!("expected a 401, got {:?}", user),
    }
    assert_eq!(app.backend.refresh_calls(), 0);
    assert_eq!(app.backend.me_calls(), 1);
    // Nothing is torn down either.
    assert!(app.stored(ACCESS_TOKEN_KEY).await.is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_share_one_refresh_between_concurrent_failures(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.login().await;
    app.backend.expire_access_tokens();
    app.backend.set_refresh_delay(Duration::from_millis(200));

    let results = join_all((0..5).map(|_| app.session.me())).await;

    assert!(results.iter().all(|r| r.is_ok()), "{results:?}");
    assert_eq!(app.backend.refresh_calls(), 1);

    let new_access = app.stored(ACCESS_TOKEN_KEY).await.unwrap();
    let bearers = app.backend.me_bearers.lock().unwrap().clone();
    assert_eq!(bearers.len(), 10);
    assert_eq!(
        bearers
            .iter()
            .filter(|b| b.as_deref() == Some(new_access.as_str()))
            .count(),
        5
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_not_retry_a_retried_request(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.login().await;
    app.backend
        .reject_all_me
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let result = app.session.me().await;

    assert!(matches!(result, Err(ref e) if e.is_token_not_valid()));
    assert_eq!(app.backend.refresh_calls(), 1);
    assert_eq!(app.backend.me_calls(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_end_session_when_refresh_token_is_rejected(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.login().await;
    app.session.set_current_path("/requests/42/edit").await;
    let mut events = app.session.subscribe();
    app.backend.expire_access_tokens();
    app.backend.revoke_refresh_tokens();

    let result = app.session.me().await;

    match result {
        Err(ClientError::Refresh(inner)) => assert!(inner.is_token_not_valid()),
        other => panic!("expected a refresh failure, got {:?}", other),
    }
    assert_eq!(app.backend.refresh_calls(), 1);
    assert_eq!(app.backend.me_calls(), 1);

    assert_eq!(app.stored(ACCESS_TOKEN_KEY).await, None);
    assert_eq!(app.stored(REFRESH_TOKEN_KEY).await, None);
    assert_eq!(app.stored(REFRESH_EXP_KEY).await, None);
    assert_eq!(app.stored(NAME_KEY).await, None);
    assert_eq!(
        app.stored(REDIRECTED_FROM_KEY).await.as_deref(),
        Some("/requests/42/edit")
    );
    assert_eq!(app.default_bearer().await, None);
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::Navigate {
            path: "/login".to_owned()
        }
    );
    assert!(!app.session.is_authenticated().await.unwrap());
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_allow_refresh_after_a_failed_one(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.login().await;
    app.backend.expire_access_tokens();
    app.backend.revoke_refresh_tokens();
    assert!(app.session.me().await.is_err());

    app.login().await;
    app.backend.expire_access_tokens();

    assert!(app.session.me().await.is_ok());
    assert_eq!(app.backend.refresh_calls(), 2);
}
