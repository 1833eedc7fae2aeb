use yew::prelude::*;

use crate::contexts::{
    toast::{Toast, ToastContext, ToastKind},
    use_toast,
};

#[function_component]
pub fn ToastContainer() -> Html {
    let toasts = use_context::<ToastContext>()
        .map(|context| oldest_first(&context.toasts))
        .unwrap_or_default();

    if toasts.is_empty() {
        return html! {};
    }

    html! {
        <div class="fixed top-4 right-4 z-50 space-y-3 max-w-sm w-full">
            {for toasts.into_iter().map(|toast| {
                let key = toast.id.to_string();
                html! { <ToastItem key={key} {toast} /> }
            })}
        </div>
    }
}

fn oldest_first(toasts: &[Toast]) -> Vec<Toast> {
    let mut toasts = toasts.to_vec();
    toasts.sort_by_key(|toast| toast.seq);
    toasts
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
}

#[function_component]
fn ToastItem(props: &ToastItemProps) -> Html {
    let toast_handle = use_toast();
    let toast = &props.toast;

    let (colors, icon) = match toast.kind {
        ToastKind::Error => (
            "bg-red-50 dark:bg-red-900 border-red-200 dark:border-red-800 \
             text-red-700 dark:text-red-400",
            "✕",
        ),
        ToastKind::Success => (
            "bg-green-50 dark:bg-green-900 border-green-200 \
             dark:border-green-800 text-green-700 dark:text-green-400",
            "✓",
        ),
    };

    let on_close = {
        let id = toast.id;
        Callback::from(move |_| toast_handle.remove(id))
    };

    html! {
        <div class={classes!("relative", "p-4", "rounded-lg", "border", "shadow-lg", colors)}
             role="status">
            <div class="flex items-start space-x-3">
                <span class="flex-shrink-0 text-sm font-medium">{icon}</span>
                <p class="flex-1 min-w-0 text-sm font-medium leading-5">
                    {&toast.message}
                </p>
                <button
                    onclick={on_close}
                    class="flex-shrink-0 text-neutral-400 hover:text-neutral-600"
                    title="Dismiss"
                >
                    <span class="text-lg leading-none">{"×"}</span>
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contexts::toast::{ToastAction, ToastState};
    use std::rc::Rc;
    use uuid::Uuid;

    fn add(state: Rc<ToastState>, message: &str, kind: ToastKind) -> Rc<ToastState> {
        state.reduce(ToastAction::Add {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
        })
    }

    #[test]
    fn toasts_are_listed_oldest_first() {
        let state = Rc::new(ToastState::default());
        let state = add(state, "Attribute created successfully", ToastKind::Success);
        let state = add(state, "Name is required", ToastKind::Error);
        let mut shuffled = state.toasts.clone();
        shuffled.reverse();

        let messages: Vec<_> = oldest_first(&shuffled)
            .into_iter()
            .map(|toast| toast.message)
            .collect();
        assert_eq!(messages, ["Attribute created successfully", "Name is required"]);
    }

    #[test]
    fn removing_a_toast_keeps_the_others() {
        let state = Rc::new(ToastState::default());
        let state = add(state, "first", ToastKind::Success);
        let state = add(state, "second", ToastKind::Error);
        let first = state.toasts[0].id;

        let state = state.reduce(ToastAction::Remove(first));
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].message, "second");
        assert_eq!(state.toasts[0].seq, 1);
    }
}
