use super::*;

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;

struct ScriptedService {
    response: Result<Vec<u8>, SubmitError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedService {
    fn ok(body: Vec<u8>) -> Self {
        Self {
            response: Ok(body),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: SubmitError) -> Self {
        Self {
            response: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().expect("calls").len()
    }
}

#[async_trait]
impl MergeService for ScriptedService {
    async fn fill_templates(
        &self,
        data_file: &FileHandle,
        template_file: &FileHandle,
    ) -> Result<Vec<u8>, SubmitError> {
        self.calls
            .lock()
            .expect("calls")
            .push((data_file.name().to_string(), template_file.name().to_string()));
        self.response.clone()
    }
}

struct StalledService;

#[async_trait]
impl MergeService for StalledService {
    async fn fill_templates(
        &self,
        _data_file: &FileHandle,
        _template_file: &FileHandle,
    ) -> Result<Vec<u8>, SubmitError> {
        std::future::pending::<()>().await;
        Err(SubmitError::Unexpected("unreachable".to_string()))
    }
}

#[derive(Default)]
struct RecordingSink {
    fail: bool,
    delivered: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn deliveries(&self) -> Vec<(String, Vec<u8>)> {
        self.delivered.lock().expect("delivered").clone()
    }
}

#[async_trait]
impl DownloadSink for RecordingSink {
    async fn deliver(&self, file_name: &str, archive: Vec<u8>) -> Result<PathBuf, SubmitError> {
        if self.fail {
            return Err(SubmitError::Unexpected("disk full".to_string()));
        }
        self.delivered
            .lock()
            .expect("delivered")
            .push((file_name.to_string(), archive));
        Ok(PathBuf::from("/downloads").join(file_name))
    }
}

fn file(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, name.as_bytes().to_vec())
}

fn filled_controller() -> SubmissionController {
    let mut controller = SubmissionController::new();
    controller.set_data_file(Some(file("people.xlsx")));
    controller.set_template_file(Some(file("letter.docx")));
    controller
}

fn assert_exactly_one_result(controller: &SubmissionController, sink: &RecordingSink) {
    assert!(!controller.is_submitting());
    let delivered = !sink.deliveries().is_empty();
    let errored = controller.last_error().is_some();
    assert!(delivered ^ errored, "delivered={delivered} errored={errored}");
}

#[test]
fn can_submit_covers_all_combinations() {
    let mut controller = SubmissionController::new();
    assert!(!controller.can_submit());

    controller.set_data_file(Some(file("people.csv")));
    assert!(!controller.can_submit());

    controller.set_template_file(Some(file("letter.docx")));
    assert!(controller.can_submit());

    let job = controller.begin_submission().expect("job");
    assert!(!controller.can_submit());

    controller.set_data_file(None);
    assert!(controller.is_submitting());
    assert!(!controller.can_submit());

    controller.set_data_file(Some(file("people.csv")));
    controller.finish_submission(Ok(PathBuf::from("/tmp/out.zip")));
    assert!(controller.can_submit());
    drop(job);

    controller.set_data_file(None);
    controller.begin_submission().expect_err("missing data file");
    assert!(!controller.is_submitting());
    assert!(!controller.can_submit());
}

#[tokio::test]
async fn empty_slots_report_missing_input_without_request() {
    let mut controller = SubmissionController::new();
    let service = ScriptedService::ok(vec![0x50, 0x4B]);
    let sink = RecordingSink::default();

    let outcome = controller.submit(&service, &sink).await;

    assert_eq!(outcome, SubmissionOutcome::Failed(SubmitError::MissingInput));
    assert_eq!(
        controller.last_error().map(ToString::to_string).as_deref(),
        Some("Please upload both files")
    );
    assert_eq!(service.call_count(), 0);
    assert_exactly_one_result(&controller, &sink);
}

#[tokio::test]
async fn successful_submission_delivers_fixed_archive_name() {
    let mut controller = filled_controller();
    let service = ScriptedService::ok(vec![0x50, 0x4B, 0x03, 0x04]);
    let sink = RecordingSink::default();

    let outcome = controller.submit(&service, &sink).await;

    assert_eq!(
        outcome,
        SubmissionOutcome::Delivered(PathBuf::from("/downloads/filled_documents.zip"))
    );
    assert_eq!(
        sink.deliveries(),
        vec![(
            "filled_documents.zip".to_string(),
            vec![0x50, 0x4B, 0x03, 0x04]
        )]
    );
    assert_eq!(
        *service.calls.lock().expect("calls"),
        vec![("people.xlsx".to_string(), "letter.docx".to_string())]
    );
    assert!(controller.last_error().is_none());
    assert_exactly_one_result(&controller, &sink);
}

#[tokio::test]
async fn rejected_status_surfaces_failure_message() {
    let mut controller = filled_controller();
    let service = ScriptedService::failing(SubmitError::Rejected { status: 500 });
    let sink = RecordingSink::default();

    controller.submit(&service, &sink).await;

    assert_eq!(
        controller.last_error().map(ToString::to_string).as_deref(),
        Some("Failed to process files")
    );
    assert!(sink.deliveries().is_empty());
    assert_exactly_one_result(&controller, &sink);
}

#[tokio::test]
async fn sink_failure_is_reported_as_unexpected() {
    let mut controller = filled_controller();
    let service = ScriptedService::ok(vec![0x50, 0x4B]);
    let sink = RecordingSink::failing();

    let outcome = controller.submit(&service, &sink).await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed(SubmitError::Unexpected(_))
    ));
    assert_exactly_one_result(&controller, &sink);
    assert!(controller.can_submit());
}

#[tokio::test]
async fn new_submission_clears_previous_error() {
    let mut controller = filled_controller();
    let sink = RecordingSink::default();

    controller
        .submit(&ScriptedService::failing(SubmitError::Rejected { status: 502 }), &sink)
        .await;
    assert!(controller.last_error().is_some());

    controller
        .submit(&ScriptedService::ok(vec![0x50, 0x4B]), &sink)
        .await;
    assert!(controller.last_error().is_none());
    assert_eq!(sink.deliveries().len(), 1);
}

#[tokio::test]
async fn dropped_submission_still_leaves_busy_state() {
    let mut controller = filled_controller();
    let sink = RecordingSink::default();

    let result = tokio::time::timeout(
        Duration::from_millis(20),
        controller.submit(&StalledService, &sink),
    )
    .await;
    assert!(result.is_err(), "stalled service should time out");

    assert!(!controller.is_submitting());
    assert!(!controller.slot(SlotRole::Data).is_disabled());
    assert!(matches!(
        controller.last_error(),
        Some(SubmitError::Unexpected(_))
    ));
    assert_exactly_one_result(&controller, &sink);
}

#[test]
fn submitting_disables_both_slots() {
    let mut controller = filled_controller();
    controller.handle_slot_input(SlotRole::Data, SlotInput::DragEnter);
    assert!(controller.slot(SlotRole::Data).is_drag_active());

    let _job = controller.begin_submission().expect("job");
    for role in SlotRole::ALL {
        assert!(controller.slot(role).is_disabled());
        assert!(!controller.slot(role).is_drag_active());
        assert!(controller.request_browse(role).is_none());
    }

    let change = controller.handle_slot_input(
        SlotRole::Template,
        SlotInput::Drop(vec![file("other.docx")]),
    );
    assert_eq!(change, SlotChange::Unchanged);
    assert_eq!(controller.template_file().map(FileHandle::name), Some("letter.docx"));

    controller
        .begin_submission()
        .expect_err("second submission while busy");
    assert!(controller.last_error().is_none());

    controller.finish_submission(Err(SubmitError::Transport("refused".to_string())));
    for role in SlotRole::ALL {
        assert!(!controller.slot(role).is_disabled());
    }
}

#[test]
fn replacing_data_file_keeps_readiness() {
    let mut controller = filled_controller();
    controller.set_data_file(Some(file("a.csv")));
    controller.set_data_file(Some(file("b.csv")));

    assert_eq!(controller.data_file().map(FileHandle::name), Some("b.csv"));
    assert!(controller.can_submit());
}

#[test]
fn clearing_a_filled_slot_blocks_submission() {
    let mut controller = filled_controller();
    let change = controller.handle_slot_input(SlotRole::Template, SlotInput::Clear);

    assert_eq!(change, SlotChange::Changed(None));
    assert!(controller.data_file().is_some());
    assert!(!controller.can_submit());
}

#[test]
fn job_snapshot_is_detached_from_later_selections() {
    let mut controller = filled_controller();
    let job = controller.begin_submission().expect("job");
    controller.set_data_file(Some(file("replacement.csv")));

    assert_eq!(job.data_file().name(), "people.xlsx");
    assert_eq!(job.template_file().name(), "letter.docx");
}

#[test]
fn dismissing_error_clears_it() {
    let mut controller = SubmissionController::new();
    controller.begin_submission().expect_err("missing");
    assert!(controller.last_error().is_some());
    controller.dismiss_error();
    assert!(controller.last_error().is_none());
}
