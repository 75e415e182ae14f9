pub mod app;
pub mod args;
pub mod config;
pub mod favorites;
pub mod listings;
pub mod logging;
pub mod server;
pub mod storage;
