pub mod dataset;

pub use dataset::{get_dataset, initialize_dataset, Dataset, DatasetError};
