pub mod api_client;
mod cookies;
pub mod requests;
pub mod responses;
pub mod services;

pub use api_client::{APIClient, ClientConfig, ClientError};
pub use cookies::{CookieSource, XSRF_COOKIE, XSRF_HEADER, xsrf_token};
pub use requests::{FieldErrors, FormError, ResourceForm, SubmitMode};
pub use responses::{
    ApiResponse, Attribute, Benefit, Booking, Faq, Future, MessageResponse,
    Project, Service, Step, User,
};
pub use services::{ListParams, RequestOptions, ResourceService};

pub use reqwest::StatusCode;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::str::FromStr;

/// Server-assigned identifier shared by every content entity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct EntityId(pub u64);

/// A named collection exposed by the remote API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    #[display("attributes")]
    Attributes,
    #[display("benefits")]
    Benefits,
    #[display("books")]
    Books,
    #[display("faqs")]
    Faqs,
    #[display("futures")]
    Futures,
    #[display("projects")]
    Projects,
    #[display("services")]
    Services,
    #[display("steps")]
    Steps,
    #[display("users")]
    Users,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Attributes,
        Resource::Benefits,
        Resource::Books,
        Resource::Faqs,
        Resource::Futures,
        Resource::Projects,
        Resource::Services,
        Resource::Steps,
        Resource::Users,
    ];

    /// Path segment under the API base url.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::Benefits => "benefits",
            Self::Books => "books",
            Self::Faqs => "faqs",
            Self::Futures => "futures",
            Self::Projects => "projects",
            Self::Services => "services",
            Self::Steps => "steps",
            Self::Users => "users",
        }
    }

    /// Singular, human readable name used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Attributes => "Attribute",
            Self::Benefits => "Benefit",
            Self::Books => "Book",
            Self::Faqs => "FAQ",
            Self::Futures => "Future",
            Self::Projects => "Project",
            Self::Services => "Service",
            Self::Steps => "Step",
            Self::Users => "User",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resource: {0}")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.path() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

/// A record owned by the remote API.
///
/// Ties the record type to its collection and to the form used to create or
/// update it.
pub trait Entity:
    DeserializeOwned + Clone + PartialEq + std::fmt::Debug + 'static
{
    const RESOURCE: Resource;
    type Form: ResourceForm;

    fn id(&self) -> EntityId;
}
