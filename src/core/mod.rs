pub mod app;
pub mod chat_service;
pub mod config;
pub mod constants;
pub mod copy_binder;
pub mod message;
pub mod transcript;
