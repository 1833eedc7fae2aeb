use resource_hooks::Notifier;
use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

const TOAST_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    /// Display order; toasts are shown oldest first.
    pub seq: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    next_seq: u64,
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Add {
        id: Uuid,
        message: String,
        kind: ToastKind,
    },
    Remove(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = (*self).clone();
        match action {
            ToastAction::Add { id, message, kind } => {
                state.toasts.push(Toast {
                    id,
                    seq: state.next_seq,
                    message,
                    kind,
                });
                state.next_seq += 1;
            }
            ToastAction::Remove(id) => {
                state.toasts.retain(|toast| toast.id != id);
            }
        }
        Rc::new(state)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

/// Shows toasts that dismiss themselves after a few seconds. This is the
/// [`Notifier`] every fetch and mutation hook reports to.
#[derive(Clone)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    pub fn add(&self, message: &str, kind: ToastKind) {
        let id = Uuid::new_v4();
        self.context.dispatch(ToastAction::Add {
            id,
            message: message.to_string(),
            kind,
        });

        let context = self.context.clone();
        yew::platform::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            context.dispatch(ToastAction::Remove(id));
        });
    }

    pub fn remove(&self, id: Uuid) {
        self.context.dispatch(ToastAction::Remove(id));
    }
}

impl Notifier for ToastHandle {
    fn success(&self, message: &str) {
        self.add(message, ToastKind::Success);
    }

    fn error(&self, message: &str) {
        self.add(message, ToastKind::Error);
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle { context }
}
