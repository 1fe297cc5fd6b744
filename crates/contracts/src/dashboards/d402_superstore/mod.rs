pub mod bundle;
pub mod chart;
pub mod dto;
pub mod record;

pub use bundle::*;
pub use chart::*;
pub use dto::*;
pub use record::*;
