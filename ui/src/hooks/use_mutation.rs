use futures::FutureExt;
use payloads::ClientError;
use resource_hooks::{MutationOptions, MutationSink, run_mutation};
use std::{future::Future, rc::Rc};
use yew::prelude::*;

use super::Run;
use crate::contexts::use_toast;

pub struct MutationHookReturn<A, T> {
    /// Fire and forget; the outcome shows up as state and toasts.
    pub mutate: Callback<A>,
    pub is_loading: bool,
    pub error: Option<ClientError>,
    /// Like `mutate`, but hands back the result for the caller to await.
    pub run: Run<A, T>,
}

struct StateSink {
    is_loading: UseStateHandle<bool>,
    error: UseStateHandle<Option<ClientError>>,
}

impl MutationSink for StateSink {
    fn set_loading(&self, is_loading: bool) {
        self.is_loading.set(is_loading);
    }

    fn set_error(&self, error: Option<ClientError>) {
        self.error.set(error);
    }
}

/// Wrap a write operation with loading and error state plus toasts.
///
/// On success `options.success_message` is shown, then `on_success` runs.
/// On failure every field message of a 422 gets its own toast, unless
/// `options.on_error` takes over.
#[hook]
pub fn use_mutation<A, T, F, Fut>(
    operation: F,
    options: MutationOptions<T>,
) -> MutationHookReturn<A, T>
where
    A: 'static,
    T: 'static,
    F: Fn(A) -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let toast = use_toast();
    let is_loading = use_state(|| false);
    let error = use_state(|| None::<ClientError>);

    let run: Run<A, T> = {
        let sink = Rc::new(StateSink {
            is_loading: is_loading.clone(),
            error: error.clone(),
        });
        let operation = Rc::new(operation);

        Rc::new(move |args: A| {
            let sink = sink.clone();
            let toast = toast.clone();
            let options = options.clone();
            let request = operation(args);
            async move { run_mutation(&*sink, &toast, &options, request).await }
                .boxed_local()
        })
    };

    let mutate = {
        let run = run.clone();
        Callback::from(move |args: A| {
            let request = run(args);
            yew::platform::spawn_local(async move {
                // failures are already in state and surfaced
                let _ = request.await;
            });
        })
    };

    MutationHookReturn {
        mutate,
        is_loading: *is_loading,
        error: (*error).clone(),
        run,
    }
}
