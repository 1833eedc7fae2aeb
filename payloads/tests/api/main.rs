mod auth;
mod projects;
mod resources;
mod users;

use test_helpers::spawn_app;

#[tokio::test]
async fn csrf_cookie_is_decoded_into_the_header_value() -> anyhow::Result<()> {
    let app = spawn_app().await;
    assert_eq!(app.client.xsrf_token(), None);

    app.client.csrf_cookie().await?;

    let token = app.client.xsrf_token().expect("XSRF-TOKEN cookie was set");
    // the stub issues base64 tokens, url-encoded in the cookie
    assert!(!token.contains('%'));
    assert_eq!(token.len(), 24);
    Ok(())
}
