use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    Route,
    contexts::use_api_client,
    hooks::{MutationOptions, use_mutation},
};

#[function_component]
pub fn Header() -> Html {
    let client = use_api_client();
    let navigator = use_navigator();

    let logout = use_mutation(
        move |()| {
            let client = client.clone();
            async move { client.logout().await }
        },
        MutationOptions::default()
            .success_message("Signed out")
            .on_success(move |_| {
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::Login);
                }
            }),
    );
    let on_logout = {
        let mutate = logout.mutate.clone();
        Callback::from(move |_: MouseEvent| mutate.emit(()))
    };

    html! {
        <header class="border-b border-neutral-200 dark:border-neutral-800">
            <nav class="max-w-7xl mx-auto px-4 py-4 flex items-center gap-6">
                <Link<Route> to={Route::Home} classes="font-semibold">
                    {"Dashboard"}
                </Link<Route>>
                <Link<Route> to={Route::Attributes}>{"Attributes"}</Link<Route>>
                <div class="ml-auto">
                    <button onclick={on_logout} disabled={logout.is_loading}>
                        {"Sign out"}
                    </button>
                </div>
            </nav>
        </header>
    }
}
