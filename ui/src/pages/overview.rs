use payloads::{ApiResponse, ListParams};
use yew::prelude::*;

use crate::hooks::{
    FetchHookReturn, FetchOptions, use_attributes, use_benefits, use_books,
    use_faqs, use_futures, use_projects, use_services, use_steps, use_users,
};

fn count_card<T>(
    label: &str,
    hook: &FetchHookReturn<ApiResponse<Vec<T>>, ListParams>,
) -> Html {
    let count = hook.render(label, |response, _, _| {
        html! { <span>{response.data.len()}</span> }
    });
    html! {
        <div class="rounded-lg border p-4">
            <p class="text-sm text-neutral-500">{label}</p>
            <p class="text-2xl font-semibold">{count}</p>
        </div>
    }
}

/// Record counts for every content type.
#[function_component]
pub fn OverviewPage() -> Html {
    let attributes = use_attributes(ListParams::default(), FetchOptions::default());
    let benefits = use_benefits(ListParams::default(), FetchOptions::default());
    let books = use_books(ListParams::default(), FetchOptions::default());
    let faqs = use_faqs(ListParams::default(), FetchOptions::default());
    let futures = use_futures(ListParams::default(), FetchOptions::default());
    let projects = use_projects(ListParams::default(), FetchOptions::default());
    let services = use_services(ListParams::default(), FetchOptions::default());
    let steps = use_steps(ListParams::default(), FetchOptions::default());
    let users = use_users(ListParams::default(), FetchOptions::default());

    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="grid grid-cols-3 gap-4">
                {count_card("attributes", &attributes)}
                {count_card("benefits", &benefits)}
                {count_card("bookings", &books)}
                {count_card("FAQs", &faqs)}
                {count_card("futures", &futures)}
                {count_card("projects", &projects)}
                {count_card("services", &services)}
                {count_card("steps", &steps)}
                {count_card("users", &users)}
            </div>
        </main>
    }
}
