mod client;
mod config;
mod models;

pub use client::*;
pub use self::config::*;
