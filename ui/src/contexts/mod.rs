pub mod api;
pub mod toast;

pub use api::{ApiProvider, use_api_client};
pub use toast::{ToastHandle, ToastProvider, use_toast};
