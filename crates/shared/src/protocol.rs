use serde::{Deserialize, Serialize};

pub const FILL_TEMPLATES_PATH: &str = "/fill-templates";
pub const HEALTH_PATH: &str = "/health";

pub const DATA_FILE_PART: &str = "data_file";
pub const TEMPLATE_FILE_PART: &str = "template_file";

/// Name the returned archive is always saved under.
pub const OUTPUT_FILE_NAME: &str = "filled_documents.zip";

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
