use std::{cell::RefCell, rc::Rc};

pub const DEFAULT_ERROR: &str = "An error occurred";
pub const DEFAULT_VALIDATION_ERROR: &str = "Validation error";

/// Shows short, user-facing messages (toasts in the browser).
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Keeps notifications in memory instead of showing them. Clones share the
/// same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|n| match n {
                Notification::Error(message) => Some(message.clone()),
                Notification::Success(_) => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|n| match n {
                Notification::Success(message) => Some(message.clone()),
                Notification::Error(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.log
            .borrow_mut()
            .push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.log
            .borrow_mut()
            .push(Notification::Error(message.to_string()));
    }
}

/// `message` unless it is missing or empty.
pub(crate) fn or_default<'a>(message: Option<&'a str>, default: &'a str) -> &'a str {
    message.filter(|m| !m.is_empty()).unwrap_or(default)
}
