pub mod backend;
pub mod commands;
pub mod config;
pub mod constraints;
pub mod error;
pub mod fallback;
pub mod fixtures;
pub mod store;
pub mod widget;
