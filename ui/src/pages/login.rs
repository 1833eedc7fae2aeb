use payloads::requests::LoginCredentials;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    Route,
    contexts::use_api_client,
    hooks::{MutationOptions, use_mutation},
};

#[function_component]
pub fn LoginPage() -> Html {
    let client = use_api_client();
    let navigator = use_navigator();
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();

    let login = use_mutation(
        move |credentials: LoginCredentials| {
            let client = client.clone();
            async move { client.login(&credentials).await }
        },
        MutationOptions::default()
            .success_message("Signed in")
            .on_success(move |_| {
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::Home);
                }
            }),
    );

    let onsubmit = {
        let mutate = login.mutate.clone();
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let value = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            };
            mutate.emit(LoginCredentials {
                email: value(&email_ref),
                password: value(&password_ref),
                remember: false,
            });
        })
    };

    html! {
        <main class="max-w-md mx-auto px-4 py-12">
            <h1 class="text-2xl font-bold mb-6">{"Sign in"}</h1>
            <form {onsubmit} class="space-y-4">
                <input ref={email_ref} type="email" placeholder="Email"
                       class="w-full border rounded px-3 py-2" />
                <input ref={password_ref} type="password" placeholder="Password"
                       class="w-full border rounded px-3 py-2" />
                <button type="submit" disabled={login.is_loading}
                        class="w-full rounded bg-neutral-900 text-white py-2">
                    {if login.is_loading { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </main>
    }
}
