pub mod admin;
pub mod architect;
pub mod auth;
pub mod catalog;
pub mod contracts;
pub mod pages;
