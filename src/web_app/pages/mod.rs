// web_app/pages/mod.rs - Page components module
//
// This module contains page-level Leptos components:
// - HomePage: landing search bar
// - LoginPage / RegisterPage / ResetPasswordPage: authentication
// - ProductsPage: catalog listing with selection
// - SettingsPage: profile and (admins) user management

pub mod home;
pub mod login;
pub mod products;
pub mod register;
pub mod reset_password;
pub mod settings;

// Re-export page components
pub use home::HomePage;
pub use login::LoginPage;
pub use products::ProductsPage;
pub use register::RegisterPage;
pub use reset_password::ResetPasswordPage;
pub use settings::SettingsPage;
