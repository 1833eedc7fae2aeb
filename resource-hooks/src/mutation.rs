//! Writes: create, update and delete with success and error notifications.

use futures::{FutureExt, future::LocalBoxFuture};
use payloads::ClientError;
use std::{cell::RefCell, future::Future, rc::Rc};

use crate::{
    ErrorCallback, SuccessCallback,
    notify::{DEFAULT_ERROR, DEFAULT_VALIDATION_ERROR, Notifier, or_default},
};

pub struct MutationOptions<T> {
    pub on_success: Option<SuccessCallback<T>>,
    /// Replaces every default error notification.
    pub on_error: Option<ErrorCallback>,
    /// Shown on success, before `on_success` runs.
    pub success_message: Option<String>,
}

impl<T> Default for MutationOptions<T> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
            success_message: None,
        }
    }
}

impl<T> Clone for MutationOptions<T> {
    fn clone(&self) -> Self {
        Self {
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            success_message: self.success_message.clone(),
        }
    }
}

impl<T> MutationOptions<T> {
    pub fn on_success(mut self, callback: impl Fn(&T) + 'static) -> Self {
        self.on_success = Some(Rc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&ClientError) + 'static) -> Self {
        self.on_error = Some(Rc::new(callback));
        self
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }
}

/// Where a mutation records its progress. Results are returned, not stored.
pub trait MutationSink {
    fn set_loading(&self, is_loading: bool);
    fn set_error(&self, error: Option<ClientError>);
}

/// The notifications shown for a failed mutation.
///
/// A 422 with a field map yields one message per field message, in the
/// order the server listed them. An empty map yields none.
pub fn error_messages(error: &ClientError) -> Vec<String> {
    match error {
        ClientError::Validation {
            errors: Some(errors),
            ..
        } => errors.values().flatten().cloned().collect(),
        ClientError::Validation {
            message,
            errors: None,
        } => vec![or_default(message.as_deref(), DEFAULT_VALIDATION_ERROR).into()],
        ClientError::Form(e) => e.messages().map(str::to_owned).collect(),
        other => vec![or_default(other.server_message(), DEFAULT_ERROR).into()],
    }
}

/// Run one mutation against `sink` and hand back its result.
pub async fn run_mutation<T, S>(
    sink: &S,
    notifier: &dyn Notifier,
    options: &MutationOptions<T>,
    request: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError>
where
    S: MutationSink + ?Sized,
{
    sink.set_loading(true);
    sink.set_error(None);

    let result = request.await;
    match &result {
        Ok(data) => {
            if let Some(message) = &options.success_message {
                notifier.success(message);
            }
            if let Some(on_success) = &options.on_success {
                on_success(data);
            }
        }
        Err(error) => {
            tracing::debug!("Mutation failed: {error}");
            sink.set_error(Some(error.clone()));
            match &options.on_error {
                Some(on_error) => on_error(error),
                None => {
                    for message in error_messages(error) {
                        notifier.error(&message);
                    }
                }
            }
        }
    }

    sink.set_loading(false);
    result
}

pub type MutationOperation<A, T> =
    Rc<dyn Fn(A) -> LocalBoxFuture<'static, Result<T, ClientError>>>;

#[derive(Default)]
struct MutatorState {
    is_loading: bool,
    error: Option<ClientError>,
}

impl MutationSink for RefCell<MutatorState> {
    fn set_loading(&self, is_loading: bool) {
        self.borrow_mut().is_loading = is_loading;
    }

    fn set_error(&self, error: Option<ClientError>) {
        self.borrow_mut().error = error;
    }
}

/// A write operation taking arguments `A`, with its loading and error state.
pub struct Mutator<A, T> {
    state: RefCell<MutatorState>,
    operation: MutationOperation<A, T>,
    notifier: Rc<dyn Notifier>,
    options: MutationOptions<T>,
}

impl<A: 'static, T: 'static> Mutator<A, T> {
    pub fn new<F, Fut>(
        operation: F,
        notifier: Rc<dyn Notifier>,
        options: MutationOptions<T>,
    ) -> Self
    where
        F: Fn(A) -> Fut + 'static,
        Fut: Future<Output = Result<T, ClientError>> + 'static,
    {
        let operation: MutationOperation<A, T> =
            Rc::new(move |args| operation(args).boxed_local());
        Self {
            state: RefCell::default(),
            operation,
            notifier,
            options,
        }
    }

    pub async fn mutate(&self, args: A) -> Result<T, ClientError> {
        let request = (self.operation)(args);
        run_mutation(&self.state, self.notifier.as_ref(), &self.options, request)
            .await
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<ClientError> {
        self.state.borrow().error.clone()
    }
}
