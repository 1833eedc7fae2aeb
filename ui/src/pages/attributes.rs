use payloads::{Attribute, EntityId, ListParams, requests::AttributeForm};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::{
    FetchOptions, MutationOptions, use_attributes, use_create_attribute,
    use_delete_attribute,
};

#[function_component]
pub fn AttributesPage() -> Html {
    let list = use_attributes(ListParams::default(), FetchOptions::default());

    let create = use_create_attribute(MutationOptions::default());
    let delete = {
        let refetch = list.refetch.clone();
        use_delete_attribute(
            MutationOptions::default().on_success(move |_| refetch.emit(())),
        )
    };

    let name_ref = use_node_ref();
    let value_ref = use_node_ref();
    let onsubmit = {
        let create = create.run.clone();
        let reload = list.run.clone();
        let name_ref = name_ref.clone();
        let value_ref = value_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let inputs = [name_ref.clone(), value_ref.clone()];
            let [name, value] = inputs.each_ref().map(|node| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            });
            let created = create(AttributeForm {
                name,
                value,
                description: String::new(),
            });
            let reload = reload.clone();
            yew::platform::spawn_local(async move {
                // failures are already in state and surfaced
                if created.await.is_err() {
                    return;
                }
                for input in inputs.iter().filter_map(|node| node.cast::<HtmlInputElement>()) {
                    input.set_value("");
                }
                let _ = reload(ListParams::default()).await;
            });
        })
    };

    let rows = list.render("attributes", |response, is_loading, _| {
        html! {
            <table class={classes!("w-full", is_loading.then_some("opacity-50"))}>
                <tbody>
                    {for response.data.iter().map(|attribute| {
                        let on_delete = confirmed_delete(
                            attribute,
                            delete.mutate.clone(),
                            browser_confirm,
                        )
                        .reform(|_: MouseEvent| ());
                        html! {
                            <tr key={attribute.id.to_string()}>
                                <td>{&attribute.name}</td>
                                <td>{attribute.value.clone().unwrap_or_default()}</td>
                                <td>
                                    <button onclick={on_delete}
                                            disabled={delete.is_loading}>
                                        {"Delete"}
                                    </button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        }
    });

    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8 space-y-6">
            <h1 class="text-2xl font-bold">{"Attributes"}</h1>
            <form {onsubmit} class="flex gap-2">
                <input ref={name_ref} placeholder="Name *" class="border rounded px-3 py-2" />
                <input ref={value_ref} placeholder="Value" class="border rounded px-3 py-2" />
                <button type="submit" disabled={create.is_loading}>{"Add"}</button>
            </form>
            {rows}
        </main>
    }
}

/// Emits the delete only once `ask` approves the prompt.
fn confirmed_delete(
    attribute: &Attribute,
    delete: Callback<EntityId>,
    ask: fn(&str) -> bool,
) -> Callback<()> {
    let id = attribute.id;
    let prompt = format!("Are you sure you want to delete \"{}\"?", attribute.name);
    Callback::from(move |_| {
        if ask(&prompt) {
            delete.emit(id);
        }
    })
}

fn browser_confirm(prompt: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(prompt).ok())
        .unwrap_or(false)
}
