mod fetch;
mod mutation;

use payloads::Entity;
use resource_hooks::{RecordingNotifier, ResourceHooks};
use std::rc::Rc;
use test_helpers::TestApp;

fn hooks<E: Entity>(app: &TestApp) -> (ResourceHooks<E>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    (ResourceHooks::new(&app.client, Rc::new(notifier.clone())), notifier)
}
