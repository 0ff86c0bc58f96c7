mod executor;
mod mode;
mod models;
mod planner;

pub use executor::*;
pub use mode::*;
pub use models::*;
pub use planner::*;
