pub mod dataset;
pub mod observation;
pub mod schema;

pub use dataset::Dataset;
pub use observation::{DailyObservation, FetchRange};
