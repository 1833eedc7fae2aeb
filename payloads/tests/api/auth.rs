use payloads::{
    Attribute, ClientError, ListParams,
    requests::{LoginCredentials, RegisterForm},
};
use reqwest::StatusCode;
use test_helpers::{assert_status_code, spawn_app, store::ADMIN_EMAIL};

#[tokio::test]
async fn resources_require_a_session() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .service::<Attribute>()
        .get_all(&ListParams::default())
        .await;
    let err = result.as_ref().err().cloned();
    assert_status_code(result, StatusCode::UNAUTHORIZED);
    assert!(err.is_some_and(|e| e.is_unauthorized()));

    app.login_admin().await?;
    let attributes = app
        .client
        .service::<Attribute>()
        .get_all(&ListParams::default())
        .await?;
    assert!(attributes.data.is_empty());
    Ok(())
}

#[tokio::test]
async fn login_current_user_and_logout() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    let user = app.client.current_user().await?;
    assert_eq!(user.email, ADMIN_EMAIL);
    assert_eq!(user.role.as_deref(), Some("admin"));

    app.client.logout().await?;
    assert_status_code(app.client.current_user().await, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_a_validation_error() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .login(&LoginCredentials {
            email: ADMIN_EMAIL.into(),
            password: "wrong".into(),
            remember: true,
        })
        .await;

    match result {
        Err(ClientError::Validation {
            message,
            errors: Some(errors),
        }) => {
            assert_eq!(
                message.as_deref(),
                Some("These credentials do not match our records.")
            );
            assert!(errors.contains_key("email"));
        }
        other => panic!("Expected a validation error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn writes_without_the_xsrf_header_are_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    // a fresh client never fetched the csrf cookie
    let client = app.new_client();

    let result = client.logout().await;
    assert_eq!(
        result.as_ref().err().and_then(|e| e.status()).map(|s| s.as_u16()),
        Some(419)
    );
    assert_eq!(
        result.err().as_ref().and_then(ClientError::server_message),
        Some("CSRF token mismatch.")
    );
    Ok(())
}

#[tokio::test]
async fn register_signs_the_new_account_in() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client
        .register(&RegisterForm {
            name: "Robin".into(),
            email: "robin@example.com".into(),
            password: "secret123".into(),
            password_confirmation: "secret123".into(),
        })
        .await?;

    let user = app.client.current_user().await?;
    assert_eq!(user.email, "robin@example.com");
    assert_eq!(user.role.as_deref(), Some("user"));
    Ok(())
}
