pub mod common;
pub mod config;
pub mod plan;
pub mod porkbun;
pub mod report;
pub mod service;

pub use self::config::*;
