use yew::prelude::*;
use yew_router::prelude::*;

mod components;
pub mod contexts;
pub mod hooks;
mod logs;
mod pages;

use components::{Header, ToastContainer};
use contexts::{ApiProvider, ToastProvider};
use pages::{AttributesPage, LoginPage, NotFoundPage, OverviewPage};

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <ToastProvider>
            <ApiProvider>
                <BrowserRouter>
                    <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                        <Header />
                        <Switch<Route> render={switch} />
                        <ToastContainer />
                    </div>
                </BrowserRouter>
            </ApiProvider>
        </ToastProvider>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/attributes")]
    Attributes,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <OverviewPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Attributes => html! { <AttributesPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
