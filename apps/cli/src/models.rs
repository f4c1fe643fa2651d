//! Request/response models shared across the client.

use serde::Deserialize;

/// A resume file loaded from disk: opaque bytes plus the original filename.
/// The client never inspects the content; the backend detects the format
/// from the filename extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Everything the user supplies for one submission. Cleared on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionInput {
    pub file: Option<ResumeFile>,
    pub job_title: String,
    pub job_description: String,
}

/// The four artifacts of one successful processing run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultBundle {
    pub cleaned: String,
    pub rewritten: String,
    #[serde(rename = "final")]
    pub final_resume: String,
    /// Either a structured object or a raw string, depending on whether the
    /// backend managed to parse its evaluation agent's output itself.
    pub evaluation: serde_json::Value,
}

/// Envelope of a successful `/process-resume` response.
#[derive(Debug, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    #[allow(dead_code)]
    pub success: bool,
    pub results: ResultBundle,
}

/// Body of the backend's `/health` endpoint.
#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_response_deserializes_string_evaluation() {
        let json = r#"{
            "success": true,
            "results": {
                "cleaned": "JOHN DOE\nEngineer",
                "rewritten": "JOHN DOE\nSenior Engineer",
                "final": "JOHN DOE\nSenior Engineer, polished",
                "evaluation": "```json\n{\"overall_score\": 82}\n```"
            }
        }"#;

        let response: ProcessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.cleaned, "JOHN DOE\nEngineer");
        assert_eq!(response.results.final_resume, "JOHN DOE\nSenior Engineer, polished");
        assert!(response.results.evaluation.is_string());
    }

    #[test]
    fn test_process_response_deserializes_object_evaluation() {
        let json = r#"{
            "success": true,
            "results": {
                "cleaned": "a",
                "rewritten": "b",
                "final": "c",
                "evaluation": {"overall_score": 70}
            }
        }"#;

        let response: ProcessResponse = serde_json::from_str(json).unwrap();
        assert!(response.results.evaluation.is_object());
    }
}
