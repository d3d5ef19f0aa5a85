mod records;
mod submissions;

pub use records::{JsonRecordStore, Record};
pub use submissions::{Submission, SubmissionKind, SubmissionLog};
