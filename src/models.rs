pub mod account;
pub mod auth;
pub mod catalog;
pub mod commission;
pub mod dashboard;
pub mod document;
pub mod indication;
pub mod office;
pub mod quote;
