mod comparison;
mod config;
mod error;
mod models;

pub use comparison::*;
pub(crate) use self::config::*;
pub use error::*;
pub use models::*;
