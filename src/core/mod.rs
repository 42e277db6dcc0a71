pub mod app;
pub mod chat;
pub mod config;
pub mod message;
pub mod net;
pub mod weather;
