pub mod progress;
pub mod recipient;

pub use progress::{BatchState, BatchSummary, ProgressEvent, RecordFailure};
pub use recipient::RecipientRecord;
