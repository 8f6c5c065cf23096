pub mod config;
pub mod controller;
pub mod file;
pub mod service;
pub mod sink;
pub mod slot;

pub use controller::{SubmissionController, SubmissionJob, SubmissionOutcome};
pub use file::{FileHandle, FileHandleError};
pub use service::{HttpMergeService, MergeService};
pub use sink::{DirectorySink, DownloadSink};
pub use slot::{SelectionSlot, SlotChange, SlotInput};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
