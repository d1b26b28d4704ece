pub mod record;
pub mod sample_data;
pub mod summary;

pub use record::{ModelError, NO_PARENT, SampleRecord};
pub use sample_data::{CaseConfig, SampleData, Sex};
pub use summary::{SampleSummary, summarize};
