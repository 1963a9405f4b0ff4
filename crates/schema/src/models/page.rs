use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Lifecycle of one page build, from accepted request to a renderable graph.
/// The pipeline walks these in order; `Failed` can be entered from any
/// non-terminal state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BuildStatus {
    #[default]
    Requested,
    PromptComposed,
    RawResponseReceived,
    Parsed,
    Transformed,
    GraphBuilt,
    ImagesResolving,
    Ready,
    Failed,
}

impl BuildStatus {
    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildStatus::Ready | BuildStatus::Failed)
    }
}

/// Status record for one build, queryable while the background pipeline runs.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct PageBuild {
    pub page_id: Uuid,
    pub status: BuildStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PageBuild {
    pub fn new(page_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            page_id,
            status: BuildStatus::Requested,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BuildStatus::ImagesResolving).unwrap(),
            "\"imagesresolving\""
        );
        assert_eq!(
            serde_json::to_string(&BuildStatus::Ready).unwrap(),
            "\"ready\""
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(BuildStatus::Ready.is_terminal());
        assert!(BuildStatus::Failed.is_terminal());
        assert!(!BuildStatus::Requested.is_terminal());
        assert!(!BuildStatus::ImagesResolving.is_terminal());
    }
}
