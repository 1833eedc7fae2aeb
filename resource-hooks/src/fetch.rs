//! Reads: run a request, keep its result, and surface failures.

use futures::{FutureExt, future::LocalBoxFuture};
use payloads::ClientError;
use std::{cell::RefCell, future::Future, rc::Rc};

use crate::{
    ErrorCallback, SuccessCallback,
    notify::{DEFAULT_ERROR, Notifier, or_default},
};

/// Distinguishes "not loaded yet" from a loaded value, which may itself be
/// empty.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotFetched
    }
}

impl<T> FetchState<T> {
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }
}

pub struct FetchOptions<T> {
    /// Fetch on mount and whenever the dependencies change.
    pub immediate: bool,
    pub on_success: Option<SuccessCallback<T>>,
    /// Replaces the default error notification.
    pub on_error: Option<ErrorCallback>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self {
            immediate: true,
            on_success: None,
            on_error: None,
        }
    }
}

impl<T> Clone for FetchOptions<T> {
    fn clone(&self) -> Self {
        Self {
            immediate: self.immediate,
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> FetchOptions<T> {
    /// Only fetch on an explicit refetch.
    pub fn manual() -> Self {
        Self {
            immediate: false,
            ..Self::default()
        }
    }

    pub fn on_success(mut self, callback: impl Fn(&T) + 'static) -> Self {
        self.on_success = Some(Rc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&ClientError) + 'static) -> Self {
        self.on_error = Some(Rc::new(callback));
        self
    }
}

/// Where a fetch records its progress.
pub trait FetchSink<T> {
    fn set_loading(&self, is_loading: bool);
    fn set_error(&self, error: Option<ClientError>);
    fn set_data(&self, data: T);
}

/// Run one fetch against `sink`.
///
/// On failure the error is stored and either handed to `on_error` or shown
/// through `notifier`; it is also returned. Loading is cleared either way.
pub async fn run_fetch<T, S>(
    sink: &S,
    notifier: &dyn Notifier,
    options: &FetchOptions<T>,
    request: impl Future<Output = Result<T, ClientError>>,
) -> Result<(), ClientError>
where
    T: Clone,
    S: FetchSink<T> + ?Sized,
{
    sink.set_loading(true);
    sink.set_error(None);

    let outcome = match request.await {
        Ok(data) => {
            sink.set_data(data.clone());
            if let Some(on_success) = &options.on_success {
                on_success(&data);
            }
            Ok(())
        }
        Err(error) => {
            tracing::debug!("Fetch failed: {error}");
            sink.set_error(Some(error.clone()));
            match &options.on_error {
                Some(on_error) => on_error(&error),
                None => notifier
                    .error(or_default(error.server_message(), DEFAULT_ERROR)),
            }
            Err(error)
        }
    };

    sink.set_loading(false);
    outcome
}

pub type FetchOperation<T, D> =
    Rc<dyn Fn(D) -> LocalBoxFuture<'static, Result<T, ClientError>>>;

struct FetcherState<T> {
    data: FetchState<T>,
    is_loading: bool,
    error: Option<ClientError>,
}

impl<T> FetchSink<T> for RefCell<FetcherState<T>> {
    fn set_loading(&self, is_loading: bool) {
        self.borrow_mut().is_loading = is_loading;
    }

    fn set_error(&self, error: Option<ClientError>) {
        self.borrow_mut().error = error;
    }

    fn set_data(&self, data: T) {
        self.borrow_mut().data = FetchState::Fetched(data);
    }
}

/// A fetch bound to a dependency value `D`, which is passed to the
/// operation on every run.
///
/// Overlapping runs are not cancelled or deduplicated; whichever resolves
/// last decides the stored state.
pub struct Fetcher<T, D> {
    state: RefCell<FetcherState<T>>,
    deps: RefCell<D>,
    operation: FetchOperation<T, D>,
    notifier: Rc<dyn Notifier>,
    options: FetchOptions<T>,
}

impl<T, D> Fetcher<T, D>
where
    T: Clone + 'static,
    D: Clone + PartialEq + 'static,
{
    pub fn new<F, Fut>(
        deps: D,
        operation: F,
        notifier: Rc<dyn Notifier>,
        options: FetchOptions<T>,
    ) -> Self
    where
        F: Fn(D) -> Fut + 'static,
        Fut: Future<Output = Result<T, ClientError>> + 'static,
    {
        let operation: FetchOperation<T, D> =
            Rc::new(move |deps| operation(deps).boxed_local());
        Self {
            state: RefCell::new(FetcherState {
                data: FetchState::NotFetched,
                is_loading: false,
                error: None,
            }),
            deps: RefCell::new(deps),
            operation,
            notifier,
            options,
        }
    }

    /// The first render: fetches once when `immediate`.
    pub async fn mount(&self) -> Result<(), ClientError> {
        if !self.options.immediate {
            return Ok(());
        }
        self.refetch().await
    }

    /// Track new dependencies. Fetches only when they differ from the
    /// current ones and the fetcher is `immediate`.
    pub async fn update_deps(&self, deps: D) -> Result<(), ClientError> {
        if *self.deps.borrow() == deps {
            return Ok(());
        }
        *self.deps.borrow_mut() = deps;
        if !self.options.immediate {
            return Ok(());
        }
        self.refetch().await
    }

    pub async fn refetch(&self) -> Result<(), ClientError> {
        let deps = self.deps.borrow().clone();
        self.run(deps).await
    }

    /// Run with one-off arguments. The tracked dependencies are unchanged.
    pub async fn refetch_with(&self, deps: D) -> Result<(), ClientError> {
        self.run(deps).await
    }

    async fn run(&self, deps: D) -> Result<(), ClientError> {
        let request = (self.operation)(deps);
        run_fetch(&self.state, self.notifier.as_ref(), &self.options, request)
            .await
    }

    pub fn data(&self) -> FetchState<T> {
        self.state.borrow().data.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<ClientError> {
        self.state.borrow().error.clone()
    }
}
