pub mod etl;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod store;

pub use crate::domain::model::{ProcessedRecord, RawReadme, RepositoryReference, RunOutcome};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
