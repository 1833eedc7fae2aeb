pub mod use_fetch;
pub mod use_mutation;
pub mod use_resources;

use futures::future::LocalBoxFuture;
use payloads::ClientError;
use std::rc::Rc;

pub use resource_hooks::{FetchOptions, FetchState, MutationOptions};
pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_mutation::{MutationHookReturn, use_mutation};
pub use use_resources::*;

/// An awaitable run of a hook's operation. The outcome is also stored in the
/// hook state and surfaced as toasts.
pub type Run<A, T> = Rc<dyn Fn(A) -> LocalBoxFuture<'static, Result<T, ClientError>>>;
