use futures::FutureExt;
use payloads::ClientError;
use resource_hooks::{FetchOptions, FetchSink, FetchState, run_fetch};
use std::{future::Future, rc::Rc};
use yew::prelude::*;

use super::Run;
use crate::contexts::use_toast;

/// Generic fetch hook return type
pub struct FetchHookReturn<T, D> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<ClientError>,
    /// Run again with the current dependencies.
    pub refetch: Callback<()>,
    /// Run again with other arguments, without changing the dependencies.
    pub refetch_with: Callback<D>,
    /// Like `refetch_with`, but hands back the outcome for the caller to
    /// await.
    pub run: Run<D, ()>,
}

impl<T, D> FetchHookReturn<T, D> {
    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// Without data this shows "Loading {context}..." or the error. Once
    /// data exists `render_fn` gets it along with the refetch state, so a
    /// failed refetch keeps showing the previous data.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&ClientError>) -> Html,
    {
        match self.data.as_ref() {
            None => {
                if let Some(error) = &self.error {
                    html! {
                        <div class="p-4 rounded-md bg-red-50 \
                                   dark:bg-red-900/20 border \
                                   border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 \
                                      dark:text-red-400">
                                {format!("Error loading {context}: {error}")}
                            </p>
                        </div>
                    }
                } else {
                    // not fetched yet, or waiting for a manual fetch
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("Loading {context}...")}
                            </p>
                        </div>
                    }
                }
            }
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
        }
    }
}

struct StateSink<T> {
    data: UseStateHandle<FetchState<T>>,
    is_loading: UseStateHandle<bool>,
    error: UseStateHandle<Option<ClientError>>,
}

impl<T> FetchSink<T> for StateSink<T> {
    fn set_loading(&self, is_loading: bool) {
        self.is_loading.set(is_loading);
    }

    fn set_error(&self, error: Option<ClientError>) {
        self.error.set(error);
    }

    fn set_data(&self, data: T) {
        self.data.set(FetchState::Fetched(data));
    }
}

/// Generic fetch hook composer.
///
/// `deps` is handed to `fetch_fn` on every run. With `options.immediate`
/// (the default) it fetches on mount and again whenever `deps` changes.
/// Failures are stored in `error` and shown as a toast unless
/// `options.on_error` is given.
///
/// # Example
///
/// ```rust
/// # use payloads::{EntityId, responses::{ApiResponse, Step}};
/// # use ui::contexts::use_api_client;
/// # use ui::hooks::{FetchHookReturn, FetchOptions, use_fetch};
/// # use yew::prelude::*;
/// #[hook]
/// pub fn use_step(id: EntityId) -> FetchHookReturn<ApiResponse<Step>, EntityId> {
///     let service = use_api_client().service::<Step>();
///     use_fetch(
///         id,
///         move |id| {
///             let service = service.clone();
///             async move { service.get_by_id(id).await }
///         },
///         FetchOptions::default(),
///     )
/// }
/// ```
#[hook]
pub fn use_fetch<T, D, F, Fut>(
    deps: D,
    fetch_fn: F,
    options: FetchOptions<T>,
) -> FetchHookReturn<T, D>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let toast = use_toast();
    let data = use_state(|| FetchState::NotFetched);
    let error = use_state(|| None::<ClientError>);
    let is_loading = use_state(|| false);
    let immediate = options.immediate;

    let run: Run<D, ()> = {
        let sink = Rc::new(StateSink {
            data: data.clone(),
            is_loading: is_loading.clone(),
            error: error.clone(),
        });
        let fetch_fn = Rc::new(fetch_fn);

        Rc::new(move |deps: D| {
            let sink = sink.clone();
            let toast = toast.clone();
            let options = options.clone();
            let request = fetch_fn(deps);
            async move { run_fetch(&*sink, &toast, &options, request).await }
                .boxed_local()
        })
    };

    let refetch_with = {
        let run = run.clone();
        Callback::from(move |deps: D| {
            let request = run(deps);
            yew::platform::spawn_local(async move {
                // the error is already in state and surfaced
                let _ = request.await;
            });
        })
    };

    // Auto-fetch on mount and when deps change
    {
        let refetch_with = refetch_with.clone();
        use_effect_with(deps.clone(), move |deps| {
            if immediate {
                refetch_with.emit(deps.clone());
            }
        });
    }

    FetchHookReturn {
        data: (*data).clone(),
        is_loading: *is_loading,
        error: (*error).clone(),
        refetch: {
            let refetch_with = refetch_with.clone();
            Callback::from(move |_| refetch_with.emit(deps.clone()))
        },
        refetch_with,
        run,
    }
}
