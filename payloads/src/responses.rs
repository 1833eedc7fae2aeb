use crate::{Entity, EntityId, FieldErrors, Resource, requests};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Standard envelope for successful reads and writes: `{ data, message? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of responses that carry no record, such as a delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error payload as returned by the API for non-2xx responses.
///
/// Validation failures (422) carry `errors`; some 500s carry `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: EntityId,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: EntityId,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A roadmap item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Future {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Url of the uploaded image.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Free-form text, one feature per line by convention.
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// An admin account. The password is write-only and never deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

macro_rules! impl_entity {
    ($($entity:ty => $resource:expr, $form:ty;)*) => {
        $(
            impl Entity for $entity {
                const RESOURCE: Resource = $resource;
                type Form = $form;

                fn id(&self) -> EntityId {
                    self.id
                }
            }
        )*
    };
}

impl_entity! {
    Attribute => Resource::Attributes, requests::AttributeForm;
    Benefit => Resource::Benefits, requests::BenefitForm;
    Booking => Resource::Books, requests::BookingForm;
    Faq => Resource::Faqs, requests::FaqForm;
    Future => Resource::Futures, requests::FutureForm;
    Project => Resource::Projects, requests::ProjectForm;
    Service => Resource::Services, requests::ServiceForm;
    Step => Resource::Steps, requests::StepForm;
    User => Resource::Users, requests::UserForm;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_password_is_never_read() {
        let user: User = serde_json::from_str(
            r#"{"id":3,"name":"Ada","email":"ada@example.com",
                "password":"secret","role":"admin",
                "created_at":"2025-01-01T00:00:00.000000Z"}"#,
        )
        .unwrap();
        assert_eq!(user.id, EntityId(3));
        assert_eq!(user.role.as_deref(), Some("admin"));
        assert!(!serde_json::to_string(&user).unwrap().contains("secret"));
    }

    #[test]
    fn list_envelope_with_nulls() {
        let body: ApiResponse<Vec<Step>> = serde_json::from_str(
            r#"{"data":[{"id":1,"title":"Plan","description":null,
                "order":2,"icon":null}]}"#,
        )
        .unwrap();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0].order, Some(2));
        assert_eq!(body.message, None);
    }

    #[test]
    fn validation_body() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message":"The name field is required.",
                "errors":{"name":["The name field is required."]}}"#,
        )
        .unwrap();
        let errors = body.errors.unwrap();
        assert_eq!(errors["name"], vec!["The name field is required."]);
    }

    #[test]
    fn validation_fields_keep_their_order() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"errors":{"title":["Title first"],"name":["Name second"]}}"#,
        )
        .unwrap();
        let fields: Vec<_> = body.errors.unwrap().into_keys().collect();
        assert_eq!(fields, ["title", "name"]);
    }
}
