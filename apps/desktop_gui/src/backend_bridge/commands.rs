//! Backend commands queued from UI to backend worker.

use client_core::SubmissionJob;

pub enum BackendCommand {
    FillTemplates(SubmissionJob),
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FillTemplates(_) => "fill_templates",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
