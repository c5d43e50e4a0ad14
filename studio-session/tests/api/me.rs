use studio_session::domain::UpdateUserBody;
use studio_session::errors::ClientError;
use studio_session::services::ApiRequest;
use test_context::test_context;

use crate::helpers::{TestContext, USERNAME, USER_ID};

#[test_context(TestContext)]
#[tokio::test]
async fn should_fetch_current_user_with_stored_token(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.login().await;
    let access = app
        .stored(studio_session::utils::ACCESS_TOKEN_KEY)
        .await
        .unwrap();

    let user = app.session.me().await.unwrap();

    assert_eq!(user.id, USER_ID);
    assert_eq!(user.username, USERNAME);
    assert_eq!(user.full_name(), "Réka Kiss");
    assert_eq!(*app.backend.me_bearers.lock().unwrap(), vec![Some(access)]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_update_current_user(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.login().await;

    let patch = UpdateUserBody {
        phone_number: Some("+36 30 123 4567".to_owned()),
        ..Default::default()
    };
    let user = app.session.update_me(&patch).await.unwrap();

    assert_eq!(user.phone_number.as_deref(), Some("+36 30 123 4567"));
    assert_eq!(user.first_name, "Réka");
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_send_unauthenticated_without_session(ctx: &mut TestContext) {
    let app = &ctx.test_app;

    let result = app.session.me().await;

    assert!(matches!(result, Err(ref e) if e.is_token_not_valid()));
    assert_eq!(*app.backend.me_bearers.lock().unwrap(), vec![None]);
    assert_eq!(app.backend.refresh_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_pass_ordinary_errors_through(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    app.login().await;

    let result = app.session.client().send(ApiRequest::get("boom")).await;

    match result {
        Err(ClientError::Http { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, b"boom".to_vec());
        }
        other => panic!("expected a 500, got {:?}", other),
    }
    assert_eq!(app.backend.refresh_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_report_unreachable_backend(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    assert!(app.address.starts_with("http://127.0.0.1:"));

    let session = studio_session::Session::new(
        studio_session::utils::Config::new("http://127.0.0.1:9"),
        app.session.state().token_store.clone(),
    )
    .unwrap();

    assert!(matches!(session.me().await, Err(ClientError::Network(_))));
}
