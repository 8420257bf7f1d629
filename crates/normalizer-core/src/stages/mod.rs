mod address;
mod common;
mod durations;
mod first_name;
mod notes;
pub mod schema;
mod timestamp;
mod total_duration;
mod zip;

pub use address::AddressStage;
pub use common::{CellIssue, CellOutcome, ColumnMatch, StageOutput};
pub use durations::{parse_hms, DurationError, DurationsStage};
pub use first_name::FirstNameStage;
pub use notes::NotesStage;
pub use timestamp::TimestampStage;
pub use total_duration::TotalDurationStage;
pub use zip::ZipStage;
