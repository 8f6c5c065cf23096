//! Submission controller: owns both selection slots, derives readiness, and
//! drives a single submission from start to delivered archive or error.

use std::path::PathBuf;

use shared::{
    domain::{AcceptHint, SlotRole},
    error::SubmitError,
    protocol::OUTPUT_FILE_NAME,
};
use tracing::{error, info, warn};

use crate::{
    file::FileHandle,
    service::MergeService,
    sink::DownloadSink,
    slot::{SelectionSlot, SlotChange, SlotInput},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Delivered(PathBuf),
    Failed(SubmitError),
}

impl SubmissionOutcome {
    pub fn from_result(result: Result<PathBuf, SubmitError>) -> Self {
        match result {
            Ok(path) => SubmissionOutcome::Delivered(path),
            Err(err) => SubmissionOutcome::Failed(err),
        }
    }
}

/// Owned snapshot of both files, detached from the controller so the I/O can
/// run elsewhere (e.g. on a backend worker thread).
#[derive(Debug, Clone)]
pub struct SubmissionJob {
    data_file: FileHandle,
    template_file: FileHandle,
}

impl SubmissionJob {
    pub fn data_file(&self) -> &FileHandle {
        &self.data_file
    }

    pub fn template_file(&self) -> &FileHandle {
        &self.template_file
    }

    /// One request, then one delivery. Nothing is delivered unless the request
    /// succeeded.
    pub async fn run(
        &self,
        service: &dyn MergeService,
        sink: &dyn DownloadSink,
    ) -> Result<PathBuf, SubmitError> {
        let archive = service
            .fill_templates(&self.data_file, &self.template_file)
            .await?;
        sink.deliver(OUTPUT_FILE_NAME, archive).await
    }
}

#[derive(Debug)]
pub struct SubmissionController {
    data: SelectionSlot,
    template: SelectionSlot,
    is_submitting: bool,
    last_error: Option<SubmitError>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            data: SelectionSlot::new(SlotRole::Data),
            template: SelectionSlot::new(SlotRole::Template),
            is_submitting: false,
            last_error: None,
        }
    }

    pub fn slot(&self, role: SlotRole) -> &SelectionSlot {
        match role {
            SlotRole::Data => &self.data,
            SlotRole::Template => &self.template,
        }
    }

    fn slot_mut(&mut self, role: SlotRole) -> &mut SelectionSlot {
        match role {
            SlotRole::Data => &mut self.data,
            SlotRole::Template => &mut self.template,
        }
    }

    pub fn data_file(&self) -> Option<&FileHandle> {
        self.data.held_file()
    }

    pub fn template_file(&self) -> Option<&FileHandle> {
        self.template.held_file()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn last_error(&self) -> Option<&SubmitError> {
        self.last_error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn set_data_file(&mut self, file: Option<FileHandle>) -> SlotChange {
        self.data.select(file)
    }

    pub fn set_template_file(&mut self, file: Option<FileHandle>) -> SlotChange {
        self.template.select(file)
    }

    pub fn handle_slot_input(&mut self, role: SlotRole, input: SlotInput) -> SlotChange {
        self.slot_mut(role).handle(input)
    }

    pub fn request_browse(&self, role: SlotRole) -> Option<AcceptHint> {
        self.slot(role).request_browse()
    }

    pub fn can_submit(&self) -> bool {
        self.data.held_file().is_some() && self.template.held_file().is_some() && !self.is_submitting
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
        self.data.set_disabled(submitting);
        self.template.set_disabled(submitting);
    }

    /// Start transition. On success both slots are disabled until
    /// [`finish_submission`](Self::finish_submission).
    pub fn begin_submission(&mut self) -> Result<SubmissionJob, SubmitError> {
        if self.is_submitting {
            warn!("submission requested while another is in flight");
            return Err(SubmitError::Unexpected(
                "a submission is already in progress".to_string(),
            ));
        }

        let (Some(data_file), Some(template_file)) =
            (self.data.held_file().cloned(), self.template.held_file().cloned())
        else {
            self.last_error = Some(SubmitError::MissingInput);
            return Err(SubmitError::MissingInput);
        };

        self.last_error = None;
        self.set_submitting(true);
        info!(
            data_file = data_file.name(),
            template_file = template_file.name(),
            "submission started"
        );
        Ok(SubmissionJob {
            data_file,
            template_file,
        })
    }

    /// End transition. Leaves the busy state before recording any error.
    pub fn finish_submission(
        &mut self,
        result: Result<PathBuf, SubmitError>,
    ) -> SubmissionOutcome {
        self.set_submitting(false);
        match &result {
            Ok(path) => info!(path = %path.display(), "submission delivered"),
            Err(err) => {
                error!(kind = ?err.kind(), "submission failed: {err}");
                self.last_error = Some(err.clone());
            }
        }
        SubmissionOutcome::from_result(result)
    }

    pub async fn submit(
        &mut self,
        service: &dyn MergeService,
        sink: &dyn DownloadSink,
    ) -> SubmissionOutcome {
        let job = match self.begin_submission() {
            Ok(job) => job,
            Err(err) => return SubmissionOutcome::Failed(err),
        };

        let mut guard = SubmittingGuard { controller: self };
        let result = job.run(service, sink).await;
        guard.controller.finish_submission(result)
    }
}

/// Ends the submission if the job never reached `finish_submission`, e.g. the
/// future was dropped or the job panicked.
struct SubmittingGuard<'a> {
    controller: &'a mut SubmissionController,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if self.controller.is_submitting {
            self.controller.finish_submission(Err(SubmitError::Unexpected(
                "submission was interrupted".to_string(),
            )));
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
