#[allow(clippy::module_inception)]
mod service;

pub use service::*;
