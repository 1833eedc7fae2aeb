//! Request bodies: auth payloads and the per-entity forms used to create and
//! update records.

use crate::{
    ClientError, responses,
    responses::{Attribute, Benefit, Booking, Faq, Project, Service, Step, User},
};
use indexmap::IndexMap;
use reqwest::multipart;
use serde::{Deserialize, Serialize};

/// Field name to human readable messages, as in a 422 response. Keeps the
/// order the fields were reported in.
pub type FieldErrors = IndexMap<String, Vec<String>>;

#[derive(Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Whether a form is submitted for a new record or an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

/// Required-field failures caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.errors))]
pub struct FormError {
    pub errors: FieldErrors,
}

impl FormError {
    /// Every message across all fields, in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.values().flatten().map(String::as_str)
    }
}

fn join_messages(errors: &FieldErrors) -> String {
    errors
        .values()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// An encoded request body.
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(multipart::Form),
}

/// A payload for creating or updating one kind of record.
pub trait ResourceForm {
    /// Check the required fields for this kind of submission.
    fn validate(&self, mode: SubmitMode) -> Result<(), FormError>;

    fn encode(&self) -> Result<RequestBody, ClientError>;
}

/// Collects missing required fields.
#[derive(Default)]
struct Required {
    errors: FieldErrors,
}

impl Required {
    fn field(mut self, name: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            let label = name.replace('_', " ");
            self.errors
                .entry(name.to_string())
                .or_default()
                .push(format!("The {label} field is required."));
        }
        self
    }

    fn finish(self) -> Result<(), FormError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FormError {
                errors: self.errors,
            })
        }
    }
}

fn json_body(form: &impl Serialize) -> Result<RequestBody, ClientError> {
    Ok(RequestBody::Json(serde_json::to_value(form)?))
}

/// Forms that are sent as JSON and whose required fields do not depend on
/// the submit mode.
macro_rules! json_form {
    ($form:ty, required: [$($field:ident),*]) => {
        impl ResourceForm for $form {
            fn validate(&self, _mode: SubmitMode) -> Result<(), FormError> {
                Required::default()
                    $(.field(stringify!($field), &self.$field))*
                    .finish()
            }

            fn encode(&self) -> Result<RequestBody, ClientError> {
                json_body(self)
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeForm {
    pub name: String,
    pub value: String,
    pub description: String,
}

json_form!(AttributeForm, required: [name]);

impl From<&Attribute> for AttributeForm {
    fn from(attribute: &Attribute) -> Self {
        Self {
            name: attribute.name.clone(),
            value: attribute.value.clone().unwrap_or_default(),
            description: attribute.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitForm {
    pub title: String,
    pub description: String,
    pub icon: String,
}

json_form!(BenefitForm, required: [title]);

impl From<&Benefit> for BenefitForm {
    fn from(benefit: &Benefit) -> Self {
        Self {
            title: benefit.title.clone(),
            description: benefit.description.clone().unwrap_or_default(),
            icon: benefit.icon.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

json_form!(BookingForm, required: [name, phone, email]);

impl From<&Booking> for BookingForm {
    fn from(booking: &Booking) -> Self {
        Self {
            name: booking.name.clone(),
            phone: booking.phone.clone(),
            email: booking.email.clone(),
            service: booking.service.clone().unwrap_or_default(),
            message: booking.message.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqForm {
    pub question: String,
    pub answer: String,
    pub category: String,
}

json_form!(FaqForm, required: [question, answer]);

impl From<&Faq> for FaqForm {
    fn from(faq: &Faq) -> Self {
        Self {
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            category: faq.category.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureForm {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category: String,
}

json_form!(FutureForm, required: [title]);

impl From<&responses::Future> for FutureForm {
    fn from(future: &responses::Future) -> Self {
        Self {
            title: future.title.clone(),
            description: future.description.clone().unwrap_or_default(),
            icon: future.icon.clone().unwrap_or_default(),
            category: future.category.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceForm {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub features: String,
}

json_form!(ServiceForm, required: [name]);

impl From<&Service> for ServiceForm {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone().unwrap_or_default(),
            icon: service.icon.clone().unwrap_or_default(),
            features: service.features.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepForm {
    pub title: String,
    pub description: String,
    pub order: Option<i64>,
    pub icon: String,
}

json_form!(StepForm, required: [title]);

impl From<&Step> for StepForm {
    fn from(step: &Step) -> Self {
        Self {
            title: step.title.clone(),
            description: step.description.clone().unwrap_or_default(),
            order: step.order,
            icon: step.icon.clone().unwrap_or_default(),
        }
    }
}

/// Account form. A blank password is left out of the payload entirely, so an
/// update keeps the stored password; a create requires one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub role: String,
}

impl ResourceForm for UserForm {
    fn validate(&self, mode: SubmitMode) -> Result<(), FormError> {
        let required = Required::default()
            .field("name", &self.name)
            .field("email", &self.email);
        match mode {
            SubmitMode::Create => required.field("password", &self.password),
            SubmitMode::Update => required,
        }
        .finish()
    }

    fn encode(&self) -> Result<RequestBody, ClientError> {
        json_body(self)
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            role: user.role.clone().unwrap_or_default(),
        }
    }
}

/// A file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Project form, sent as multipart so it can carry an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub client: String,
    pub duration: String,
    pub image: Option<ImageUpload>,
}

impl ProjectForm {
    /// Non-empty text fields, in form order.
    pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("category", self.category.as_str()),
            ("client", self.client.as_str()),
            ("duration", self.duration.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

impl ResourceForm for ProjectForm {
    fn validate(&self, _mode: SubmitMode) -> Result<(), FormError> {
        Required::default().field("title", &self.title).finish()
    }

    fn encode(&self) -> Result<RequestBody, ClientError> {
        let mut form = multipart::Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value.to_string());
        }
        if let Some(image) = &self.image {
            let part = multipart::Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone());
            let part = match part.mime_str(&image.mime_type) {
                Ok(part) => part,
                Err(e) => {
                    tracing::warn!(
                        "Sending {} without a content type: {e}",
                        image.file_name
                    );
                    multipart::Part::bytes(image.bytes.clone())
                        .file_name(image.file_name.clone())
                }
            };
            form = form.part("image", part);
        }
        Ok(RequestBody::Multipart(form))
    }
}

impl From<&Project> for ProjectForm {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone().unwrap_or_default(),
            category: project.category.clone().unwrap_or_default(),
            client: project.client.clone().unwrap_or_default(),
            duration: project.duration.clone().unwrap_or_default(),
            image: None,
        }
    }
}
