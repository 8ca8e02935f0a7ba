pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod report;
pub mod scan;
pub mod snapshot;
pub mod store;
