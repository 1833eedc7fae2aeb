pub mod mock;
pub mod routes;
pub mod store;
pub mod telemetry;

use actix_cors::Cors;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    App, HttpServer,
    cookie::Key,
    dev::{Server, Service},
    http::header::CONTENT_TYPE,
    web,
};
use payloads::{APIClient, ClientConfig, requests::LoginCredentials};
use reqwest::StatusCode;
use serde_json::Value;
use std::net::TcpListener;

use crate::store::{
    ADMIN_EMAIL, ADMIN_PASSWORD, InjectedFailure, RecordedRequest, StubStore,
};

pub struct TestApp {
    pub port: u16,
    pub client: APIClient,
    pub store: web::Data<StubStore>,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// A second client with its own, empty cookie jar.
    pub fn new_client(&self) -> APIClient {
        APIClient::new(ClientConfig::for_host(&self.address()))
            .expect("failed to build API client")
    }

    pub async fn login_admin(&self) -> anyhow::Result<()> {
        self.client
            .login(&LoginCredentials {
                email: ADMIN_EMAIL.into(),
                password: ADMIN_PASSWORD.into(),
                remember: false,
            })
            .await?;
        Ok(())
    }

    /// Requests to `/api` seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.store
            .requests()
            .into_iter()
            .filter(|request| request.path.starts_with("/api/"))
            .collect()
    }

    pub fn clear_requests(&self) {
        self.store.clear_requests();
    }

    /// Make the next resource request fail with this status and JSON body.
    pub fn fail_next(&self, status: u16, body: Value) {
        self.store.fail_next(InjectedFailure { status, body });
    }
}

/// Build the stub server, but not await it.
///
/// Returns the port the server bound to; pass 0 for an OS-assigned port.
pub fn build(
    store: web::Data<StubStore>,
    port: u16,
) -> std::io::Result<(Server, u16)> {
    let secret_key = Key::generate();
    let listener = TcpListener::bind(format!("127.0.0.1:{port}"))?;
    let port = listener.local_addr()?.port();

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();
        let log_store = store.clone();

        App::new()
            .wrap_fn(move |req, srv| {
                let content_type = req
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.split(';').next())
                    .map(|value| value.trim().to_string());
                log_store.record_request(RecordedRequest {
                    method: req.method().to_string(),
                    path: req.path().to_string(),
                    query: req.query_string().to_string(),
                    content_type,
                });
                srv.call(req)
            })
            .wrap(cors)
            .wrap(
                SessionMiddleware::builder(
                    CookieSessionStore::default(),
                    secret_key.clone(),
                )
                .cookie_name("laravel_session".into())
                .cookie_secure(false)
                .build(),
            )
            .service(routes::csrf_cookie)
            .service(routes::api_services())
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();
    Ok((server, port))
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    telemetry::try_init_subscriber(telemetry::get_subscriber("error"));

    let store = web::Data::new(StubStore::seeded());
    let (server, port) =
        build(store.clone(), port).expect("failed to bind stub server");
    tokio::spawn(server);

    let client =
        APIClient::new(ClientConfig::for_host(&format!("http://127.0.0.1:{port}")))
            .expect("failed to build API client");

    TestApp {
        port,
        client,
        store,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(e) => assert_eq!(e.status(), Some(expected), "{e}"),
        Ok(_) => panic!("Expected status {expected}, got a success"),
    };
}
