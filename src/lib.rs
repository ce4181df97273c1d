pub mod app;
pub mod app_state;
pub mod config;
pub mod document;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod openapi;
pub mod titles;
