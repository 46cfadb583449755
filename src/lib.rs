pub mod dataset;
pub mod error;
pub mod model;
pub mod query;
pub mod records;
pub mod view;
pub mod xlsx;

pub use dataset::Dataset;
pub use error::{RecordsError, Result};
pub use model::*;
pub use query::{evaluate, Dimension, Evaluation, FilterSelection, Summary};
