use payloads::{
    ClientError, RequestOptions, User,
    requests::UserForm,
};
use reqwest::StatusCode;
use test_helpers::{assert_status_code, spawn_app, store::ADMIN_EMAIL};

fn editor() -> UserForm {
    UserForm {
        name: "Sam".into(),
        email: "sam@example.com".into(),
        password: "secret123".into(),
        role: "editor".into(),
    }
}

#[tokio::test]
async fn blank_password_on_update_keeps_the_old_one() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let users = app.client.service::<User>();
    let options = RequestOptions::default();

    let user = users.create(&editor(), &options).await?.data;
    assert_eq!(user.role.as_deref(), Some("editor"));

    let mut form = UserForm::from(&user);
    assert!(form.password.is_empty());
    form.name = "Sam Editor".into();
    let updated = users.update(user.id, &form, &options).await?.data;
    assert_eq!(updated.name, "Sam Editor");

    // the stored password still works
    let other = app.new_client();
    other
        .login(&payloads::requests::LoginCredentials {
            email: "sam@example.com".into(),
            password: "secret123".into(),
            remember: false,
        })
        .await?;
    assert_eq!(other.current_user().await?.id, user.id);
    Ok(())
}

#[tokio::test]
async fn creating_a_user_requires_a_password() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    app.clear_requests();

    let form = UserForm {
        password: String::new(),
        ..editor()
    };
    let result = app
        .client
        .service::<User>()
        .create(&form, &RequestOptions::default())
        .await;
    match result {
        Err(ClientError::Form(e)) => {
            assert_eq!(
                e.messages().collect::<Vec<_>>(),
                ["The password field is required."]
            );
        }
        other => panic!("Expected a form error, got {other:?}"),
    }
    assert!(app.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_server_validation_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    let form = UserForm {
        email: ADMIN_EMAIL.into(),
        ..editor()
    };
    let result = app
        .client
        .service::<User>()
        .create(&form, &RequestOptions::default())
        .await;

    let Err(ClientError::Validation {
        errors: Some(errors),
        ..
    }) = &result
    else {
        panic!("Expected a validation error, got {result:?}");
    };
    assert_eq!(errors["email"], ["The email has already been taken."]);
    assert_status_code(result, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}
