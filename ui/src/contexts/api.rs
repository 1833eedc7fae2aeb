use payloads::{APIClient, ClientConfig};
use std::rc::Rc;
use yew::prelude::*;

/// The one client the whole app shares, so cookies and the XSRF token are
/// shared too.
#[derive(Clone)]
pub struct ApiContext(pub Rc<APIClient>);

impl PartialEq for ApiContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// `BACKEND_URL` at build time, else the page's own origin.
fn client_config() -> ClientConfig {
    if let Some(url) = option_env!("BACKEND_URL") {
        return ClientConfig::for_host(url);
    }
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .map(|origin| ClientConfig::for_host(&origin))
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct ApiProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ApiProvider(props: &ApiProviderProps) -> Html {
    let client = use_memo((), |_| {
        let config = client_config();
        tracing::debug!("API base url: {}", config.base_url);
        APIClient::new(config).map(|client| ApiContext(Rc::new(client)))
    });

    match &*client {
        Ok(context) => html! {
            <ContextProvider<ApiContext> context={context.clone()}>
                {props.children.clone()}
            </ContextProvider<ApiContext>>
        },
        Err(e) => {
            tracing::error!("Could not create the API client: {e}");
            html! {
                <p class="p-4 text-red-700">{"Unable to reach the API."}</p>
            }
        }
    }
}

#[hook]
pub fn use_api_client() -> APIClient {
    let context = use_context::<ApiContext>()
        .expect("use_api_client must be used within an ApiProvider");
    (*context.0).clone()
}
