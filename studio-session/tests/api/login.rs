use studio_session::errors::LoginError;
use studio_session::services::token_decoder::decode_access_claims;
use studio_session::utils::{
    ACCESS_TOKEN_KEY, AVATAR_KEY, GROUPS_KEY, NAME_KEY, REFRESH_EXP_KEY, REFRESH_TOKEN_KEY,
    ROLE_KEY, USER_ID_KEY,
};
use studio_session::SessionEvent;
use test_context::test_context;

use crate::helpers::{TestContext, PASSWORD, SOCIAL_CODE, SOCIAL_PROVIDER, USERNAME, USER_ID};

#[test_context(TestContext)]
#[tokio::test]
async fn should_store_session_on_login(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let mut events = app.session.subscribe();

    let identity = app.session.login(USERNAME, PASSWORD).await.unwrap();

    assert_eq!(identity.user_id, Some(USER_ID));
    assert_eq!(identity.name, "Kiss Réka");
    assert_eq!(identity.role, "staff");
    // Unknown codes are kept as they are.
    assert_eq!(identity.groups, vec!["Crew", "Editor", "LIGHTING"]);

    let access = app.stored(ACCESS_TOKEN_KEY).await.expect("no access token stored");
    let claims = decode_access_claims(&access).unwrap();
    assert!(app.stored(REFRESH_TOKEN_KEY).await.is_some());
    let refresh_exp: i64 = app.stored(REFRESH_EXP_KEY).await.unwrap().parse().unwrap();
    assert!(refresh_exp > claims.exp);
    assert_eq!(app.stored(NAME_KEY).await.as_deref(), Some("Kiss Réka"));
    assert_eq!(
        app.stored(AVATAR_KEY).await.as_deref(),
        Some("https://cdn.example.org/avatars/42.png")
    );
    assert_eq!(app.stored(USER_ID_KEY).await.as_deref(), Some("42"));
    assert_eq!(app.stored(ROLE_KEY).await.as_deref(), Some("staff"));
    assert_eq!(
        app.stored(GROUPS_KEY).await.as_deref(),
        Some(r#"["Crew","Editor","LIGHTING"]"#)
    );

    assert_eq!(app.default_bearer().await, Some(access));
    assert_eq!(events.recv().await.unwrap(), SessionEvent::StorageChanged);
    assert!(app.session.is_authenticated().await.unwrap());
    assert_eq!(app.session.identity().await.unwrap(), Some(identity));
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_reject_bad_credentials(ctx: &mut TestContext) {
    let app = &ctx.test_app;

    let result = app.session.login(USERNAME, "wrong").await;

    assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    assert_eq!(app.stored(ACCESS_TOKEN_KEY).await, None);
    assert!(!app.session.is_authenticated().await.unwrap());
    assert_eq!(app.backend.refresh_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_login_with_social_code(ctx: &mut TestContext) {
    let app = &ctx.test_app;

    let identity = app
        .session
        .login_social(SOCIAL_PROVIDER, SOCIAL_CODE)
        .await
        .unwrap();

    assert_eq!(identity.user_id, Some(USER_ID));
    assert!(identity.in_group("Editor"));
    assert!(app.stored(ACCESS_TOKEN_KEY).await.is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_reject_bad_social_code(ctx: &mut TestContext) {
    let app = &ctx.test_app;

    let result = app.session.login_social(SOCIAL_PROVIDER, "stale").await;

    assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    assert_eq!(app.stored(ACCESS_TOKEN_KEY).await, None);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_hand_out_redirect_once(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.store(studio_session::utils::REDIRECTED_FROM_KEY, "/requests/7".to_owned())
        .await;

    app.login().await;

    assert_eq!(
        app.session.take_redirect().await.unwrap().as_deref(),
        Some("/requests/7")
    );
    assert_eq!(app.session.take_redirect().await.unwrap(), None);
}
