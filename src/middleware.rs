pub mod auth;
pub mod gate;
pub mod i18n;
pub mod session;
