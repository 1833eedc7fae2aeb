//! Routes of the stub API, shaped like the Laravel + Sanctum backend the
//! dashboard talks to.

use actix_multipart::Multipart;
use actix_session::Session;
use actix_web::{
    HttpRequest, HttpResponse, ResponseError, body::BoxBody,
    cookie::Cookie, delete, dev::HttpServiceFactory, get, http::StatusCode,
    post, put, web,
};
use base64::Engine;
use futures::StreamExt;
use payloads::{FieldErrors, Resource, XSRF_COOKIE, XSRF_HEADER};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::store::{Record, StubStore};

const USER_ID_KEY: &str = "user_id";
const CSRF_KEY: &str = "csrf_token";

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(login)
        .service(logout)
        .service(register)
        .service(current_user)
        .service(create_project)
        .service(update_project)
        .service(list_records)
        .service(create_record)
        .service(show_record)
        .service(update_record)
        .service(delete_record)
}

#[derive(Debug, thiserror::Error)]
pub enum StubError {
    #[error("Unauthenticated.")]
    Unauthenticated,
    #[error("CSRF token mismatch.")]
    CsrfMismatch,
    #[error("No query results for model [App\\Models\\{}] {id}", .resource.label())]
    NotFound { resource: Resource, id: u64 },
    #[error("The route {0} could not be found.")]
    UnknownRoute(String),
    #[error("{message}")]
    Validation { message: String, errors: FieldErrors },
    #[error("Injected failure")]
    Injected { status: u16, body: Value },
    #[error("Server Error")]
    Unexpected(#[from] anyhow::Error),
}

impl ResponseError for StubError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::Unauthenticated => {
                HttpResponse::Unauthorized().json(json!({ "message": self.to_string() }))
            }
            Self::CsrfMismatch => {
                let status = StatusCode::from_u16(419)
                    .unwrap_or(StatusCode::FORBIDDEN);
                HttpResponse::build(status)
                    .json(json!({ "message": self.to_string() }))
            }
            Self::NotFound { .. } | Self::UnknownRoute(_) => {
                HttpResponse::NotFound().json(json!({ "message": self.to_string() }))
            }
            Self::Validation { message, errors } => {
                HttpResponse::UnprocessableEntity()
                    .json(json!({ "message": message, "errors": errors }))
            }
            Self::Injected { status, body } => {
                let status = StatusCode::from_u16(*status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                HttpResponse::build(status).json(body)
            }
            Self::Unexpected(e) => HttpResponse::InternalServerError()
                .json(json!({ "message": self.to_string(), "error": format!("{e:#}") })),
        }
    }
}

/// Issue a fresh XSRF-TOKEN cookie (url-encoded, as Laravel does) and keep
/// the raw token in the session.
#[get("/sanctum/csrf-cookie")]
pub async fn csrf_cookie(session: Session) -> Result<HttpResponse, StubError> {
    let token = base64::engine::general_purpose::STANDARD
        .encode(Uuid::new_v4().as_bytes());
    session
        .insert(CSRF_KEY, &token)
        .map_err(anyhow::Error::from)?;
    let cookie = Cookie::build(
        XSRF_COOKIE,
        urlencoding::encode(&token).into_owned(),
    )
    .path("/")
    .http_only(false)
    .finish();
    Ok(HttpResponse::NoContent().cookie(cookie).finish())
}

fn verify_csrf(req: &HttpRequest, session: &Session) -> Result<(), StubError> {
    let expected = session
        .get::<String>(CSRF_KEY)
        .map_err(anyhow::Error::from)?;
    let sent = req
        .headers()
        .get(XSRF_HEADER)
        .and_then(|value| value.to_str().ok());
    match (expected, sent) {
        (Some(expected), Some(sent)) if expected == sent => Ok(()),
        _ => Err(StubError::CsrfMismatch),
    }
}

fn require_user(session: &Session) -> Result<u64, StubError> {
    session
        .get::<u64>(USER_ID_KEY)
        .map_err(anyhow::Error::from)?
        .ok_or(StubError::Unauthenticated)
}

fn parse_resource(name: &str) -> Result<Resource, StubError> {
    name.parse()
        .map_err(|_| StubError::UnknownRoute(format!("api/{name}")))
}

fn injected(store: &StubStore) -> Result<(), StubError> {
    match store.take_failure() {
        Some(failure) => Err(StubError::Injected {
            status: failure.status,
            body: failure.body,
        }),
        None => Ok(()),
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Server-side rules: required columns per resource plus unique emails.
fn validate(
    store: &StubStore,
    resource: Resource,
    fields: &Record,
    existing: Option<u64>,
) -> Result<(), StubError> {
    let required: &[&str] = match resource {
        Resource::Attributes | Resource::Services => &["name"],
        Resource::Benefits
        | Resource::Futures
        | Resource::Projects
        | Resource::Steps => &["title"],
        Resource::Books => &["name", "phone", "email"],
        Resource::Faqs => &["question", "answer"],
        Resource::Users if existing.is_none() => &["name", "email", "password"],
        Resource::Users => &["name", "email"],
    };

    let mut errors = FieldErrors::new();
    for field in required {
        if is_blank(fields.get(*field)) {
            errors
                .entry(field.to_string())
                .or_default()
                .push(format!("The {field} field is required."));
        }
    }
    let email = fields.get("email").and_then(Value::as_str);
    if let (Resource::Users, Some(email)) = (resource, email) {
        if store.email_taken(email, existing) {
            errors
                .entry("email".into())
                .or_default()
                .push("The email has already been taken.".into());
        }
    }
    validation_result(errors)
}

fn validation_result(errors: FieldErrors) -> Result<(), StubError> {
    let mut messages = errors.values().flatten();
    let Some(first) = messages.next() else {
        return Ok(());
    };
    let message = match messages.count() {
        0 => first.clone(),
        1 => format!("{first} (and 1 more error)"),
        n => format!("{first} (and {n} more errors)"),
    };
    Err(StubError::Validation { message, errors })
}

fn message(resource: Resource, action: &str) -> String {
    format!("{} {action} successfully", resource.label())
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    session: Session,
    store: web::Data<StubStore>,
    body: web::Json<Record>,
) -> Result<HttpResponse, StubError> {
    verify_csrf(&req, &session)?;
    let field = |name: &str| {
        body.get(name).and_then(Value::as_str).unwrap_or_default().to_string()
    };
    let mut errors = FieldErrors::new();
    for name in ["email", "password"] {
        if field(name).is_empty() {
            errors
                .entry(name.into())
                .or_default()
                .push(format!("The {name} field is required."));
        }
    }
    validation_result(errors)?;

    let Some(user_id) = store.authenticate(&field("email"), &field("password"))
    else {
        let message = "These credentials do not match our records.";
        let mut errors = FieldErrors::new();
        errors.insert("email".into(), vec![message.into()]);
        return Err(StubError::Validation {
            message: message.into(),
            errors,
        });
    };

    session.renew();
    session
        .insert(USER_ID_KEY, user_id)
        .map_err(anyhow::Error::from)?;
    tracing::info!(user_id, "Stub login");
    Ok(HttpResponse::NoContent().finish())
}

#[post("/logout")]
pub async fn logout(
    req: HttpRequest,
    session: Session,
) -> Result<HttpResponse, StubError> {
    verify_csrf(&req, &session)?;
    require_user(&session)?;
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

#[post("/register")]
pub async fn register(
    req: HttpRequest,
    session: Session,
    store: web::Data<StubStore>,
    body: web::Json<Record>,
) -> Result<HttpResponse, StubError> {
    verify_csrf(&req, &session)?;
    let mut fields = body.into_inner();
    validate(&store, Resource::Users, &fields, None)?;
    if fields.get("password") != fields.get("password_confirmation") {
        let mut errors = FieldErrors::new();
        errors.insert(
            "password".into(),
            vec!["The password field confirmation does not match.".into()],
        );
        validation_result(errors)?;
    }
    fields.insert("role".into(), json!("user"));
    let user = store.insert(Resource::Users, fields);
    let user_id = user["id"].as_u64().unwrap_or_default();

    session.renew();
    session
        .insert(USER_ID_KEY, user_id)
        .map_err(anyhow::Error::from)?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/user")]
pub async fn current_user(
    session: Session,
    store: web::Data<StubStore>,
) -> Result<HttpResponse, StubError> {
    let user_id = require_user(&session)?;
    let user = store
        .get(Resource::Users, user_id)
        .ok_or(StubError::Unauthenticated)?;
    Ok(HttpResponse::Ok().json(user))
}

#[get("/{resource}")]
pub async fn list_records(
    session: Session,
    store: web::Data<StubStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, StubError> {
    let resource = parse_resource(&path)?;
    require_user(&session)?;
    injected(&store)?;
    Ok(HttpResponse::Ok().json(json!({ "data": store.list(resource) })))
}

#[get("/{resource}/{id}")]
pub async fn show_record(
    session: Session,
    store: web::Data<StubStore>,
    path: web::Path<(String, u64)>,
) -> Result<HttpResponse, StubError> {
    let (resource, id) = path.into_inner();
    let resource = parse_resource(&resource)?;
    require_user(&session)?;
    injected(&store)?;
    let record = store
        .get(resource, id)
        .ok_or(StubError::NotFound { resource, id })?;
    Ok(HttpResponse::Ok().json(json!({ "data": record })))
}

#[post("/{resource}")]
pub async fn create_record(
    req: HttpRequest,
    session: Session,
    store: web::Data<StubStore>,
    path: web::Path<String>,
    body: web::Json<Record>,
) -> Result<HttpResponse, StubError> {
    let resource = parse_resource(&path)?;
    verify_csrf(&req, &session)?;
    require_user(&session)?;
    injected(&store)?;
    let fields = body.into_inner();
    validate(&store, resource, &fields, None)?;
    let record = store.insert(resource, fields);
    Ok(HttpResponse::Created().json(json!({
        "message": message(resource, "created"),
        "data": record,
    })))
}

#[put("/{resource}/{id}")]
pub async fn update_record(
    req: HttpRequest,
    session: Session,
    store: web::Data<StubStore>,
    path: web::Path<(String, u64)>,
    body: web::Json<Record>,
) -> Result<HttpResponse, StubError> {
    let (resource, id) = path.into_inner();
    let resource = parse_resource(&resource)?;
    verify_csrf(&req, &session)?;
    require_user(&session)?;
    injected(&store)?;
    if store.get(resource, id).is_none() {
        return Err(StubError::NotFound { resource, id });
    }
    let fields = body.into_inner();
    validate(&store, resource, &fields, Some(id))?;
    let record = store
        .update(resource, id, fields)
        .ok_or(StubError::NotFound { resource, id })?;
    Ok(HttpResponse::Ok().json(json!({
        "message": message(resource, "updated"),
        "data": record,
    })))
}

#[delete("/{resource}/{id}")]
pub async fn delete_record(
    req: HttpRequest,
    session: Session,
    store: web::Data<StubStore>,
    path: web::Path<(String, u64)>,
) -> Result<HttpResponse, StubError> {
    let (resource, id) = path.into_inner();
    let resource = parse_resource(&resource)?;
    verify_csrf(&req, &session)?;
    require_user(&session)?;
    injected(&store)?;
    if !store.remove(resource, id) {
        return Err(StubError::NotFound { resource, id });
    }
    Ok(HttpResponse::Ok().json(json!({ "message": message(resource, "deleted") })))
}

/// Text fields and the optional uploaded image of a multipart project form.
async fn read_project_form(
    mut payload: Multipart,
) -> Result<Record, StubError> {
    let mut fields = Record::new();
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| anyhow::anyhow!("{e}"))?;
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk.map_err(|e| anyhow::anyhow!("{e}"))?);
        }

        let value = match file_name {
            Some(file_name) => {
                tracing::debug!(file_name, size = bytes.len(), "Stored upload");
                json!(format!("/storage/projects/{}-{file_name}", Uuid::new_v4()))
            }
            None => json!(String::from_utf8_lossy(&bytes)),
        };
        fields.insert(name, value);
    }
    Ok(fields)
}

#[post("/projects")]
pub async fn create_project(
    req: HttpRequest,
    session: Session,
    store: web::Data<StubStore>,
    payload: Multipart,
) -> Result<HttpResponse, StubError> {
    verify_csrf(&req, &session)?;
    require_user(&session)?;
    injected(&store)?;
    let fields = read_project_form(payload).await?;
    validate(&store, Resource::Projects, &fields, None)?;
    let record = store.insert(Resource::Projects, fields);
    Ok(HttpResponse::Created().json(json!({
        "message": message(Resource::Projects, "created"),
        "data": record,
    })))
}

#[post("/projects/{id}")]
pub async fn update_project(
    req: HttpRequest,
    session: Session,
    store: web::Data<StubStore>,
    path: web::Path<u64>,
    payload: Multipart,
) -> Result<HttpResponse, StubError> {
    let id = path.into_inner();
    let resource = Resource::Projects;
    verify_csrf(&req, &session)?;
    require_user(&session)?;
    injected(&store)?;
    if store.get(resource, id).is_none() {
        return Err(StubError::NotFound { resource, id });
    }
    let fields = read_project_form(payload).await?;
    validate(&store, resource, &fields, Some(id))?;
    let record = store
        .update(resource, id, fields)
        .ok_or(StubError::NotFound { resource, id })?;
    Ok(HttpResponse::Ok().json(json!({
        "message": message(resource, "updated"),
        "data": record,
    })))
}
