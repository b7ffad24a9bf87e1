pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod i18n;
pub mod models;
pub mod page;
pub mod retry;
