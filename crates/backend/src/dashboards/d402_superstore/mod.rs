pub mod aggregation;
pub mod charts;
pub mod service;

pub use aggregation::{aggregate, available_years};
pub use charts::build;
