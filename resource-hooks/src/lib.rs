//! Loading, error and notification handling for reads and writes against
//! the content API.
//!
//! A fetch or mutation writes its progress into a sink ([`FetchSink`],
//! [`MutationSink`]) and reports user-facing messages to a [`Notifier`].
//! [`Fetcher`] and [`Mutator`] own their state; the Yew hooks in `ui` plug
//! in their own state handles instead.

pub mod bindings;
pub mod fetch;
pub mod mutation;
pub mod notify;

pub use bindings::{Action, ResourceHooks, success_message};
pub use fetch::{FetchOptions, FetchSink, FetchState, Fetcher, run_fetch};
pub use mutation::{
    MutationOptions, MutationSink, Mutator, error_messages, run_mutation,
};
pub use notify::{Notification, Notifier, RecordingNotifier};

use payloads::ClientError;
use std::rc::Rc;

pub type SuccessCallback<T> = Rc<dyn Fn(&T)>;
pub type ErrorCallback = Rc<dyn Fn(&ClientError)>;
