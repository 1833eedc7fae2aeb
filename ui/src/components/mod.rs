mod header;
mod toasts;

pub use header::Header;
pub use toasts::ToastContainer;
