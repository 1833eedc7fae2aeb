mod attributes;
mod login;
mod not_found;
mod overview;

pub use attributes::AttributesPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use overview::OverviewPage;
