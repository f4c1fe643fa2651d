//! Wires parsed arguments to a session run: build the submission input, run
//! it, render the results, then fire any requested exports.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{error, info};

use crate::api_client::{ApiClient, DownloadFormat, ExportRequest};
use crate::cli::Cli;
use crate::config::Config;
use crate::errors::AppError;
use crate::evaluation;
use crate::models::{ResultBundle, ResumeFile, SubmissionInput};
use crate::render;
use crate::session::Session;

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let client = Arc::new(ApiClient::new(config.api_base_url.clone()));

    if cli.check {
        let health = client.health().await?;
        println!("Backend at {} is {}", config.api_base_url, health.status);
        return Ok(());
    }

    let session = Session::new(client.clone());
    session.set_input(build_input(&cli).await?);

    println!("Submitting resume for processing (this can take a few minutes)...");
    if let Err(e) = session.submit().await {
        // The session already folded the failure into a user-facing message.
        let message = session.error().unwrap_or_else(|| e.user_message());
        bail!(message);
    }

    let results = session
        .results()
        .context("submission completed without a result bundle")?;

    println!("\n{}", render::render_bundle(&results));

    run_exports(&cli, client, &results).await;

    Ok(())
}

async fn build_input(cli: &Cli) -> Result<SubmissionInput> {
    let file = match &cli.resume {
        Some(path) => Some(load_resume(path).await?),
        None => None,
    };

    let job_description = match (&cli.job_description, &cli.job_description_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description from {}", path.display()))?,
        (None, None) => String::new(),
    };

    Ok(SubmissionInput {
        file,
        job_title: cli.job_title.clone().unwrap_or_default(),
        job_description,
    })
}

async fn load_resume(path: &Path) -> Result<ResumeFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read resume file {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    Ok(ResumeFile { name, bytes })
}

/// Which of the four artifacts an export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Artifact {
    Cleaned,
    Rewritten,
    Final,
    Evaluation,
}

impl Artifact {
    fn parse(s: &str) -> Result<Self, AppError> {
        match s.to_ascii_lowercase().as_str() {
            "cleaned" => Ok(Artifact::Cleaned),
            "rewritten" => Ok(Artifact::Rewritten),
            "final" => Ok(Artifact::Final),
            "evaluation" => Ok(Artifact::Evaluation),
            other => Err(AppError::Validation(format!(
                "Unknown artifact '{other}' (expected cleaned, rewritten, final, or evaluation)"
            ))),
        }
    }

    fn filename(self, format: DownloadFormat) -> String {
        let stem = match self {
            Artifact::Cleaned => "cleaned_resume",
            Artifact::Rewritten => "rewritten_resume",
            Artifact::Final => "final_resume",
            Artifact::Evaluation => "ats_evaluation",
        };
        format!("{stem}.{}", format.extension())
    }
}

/// Parses an `--export ARTIFACT[:FORMAT]` value into a request against the
/// result bundle. Unknown artifacts are an error; unknown formats fall back
/// to plain text by policy.
fn build_export(
    arg: &str,
    results: &ResultBundle,
    evaluation_text: &str,
) -> Result<ExportRequest, AppError> {
    let (artifact_name, format_name) = match arg.split_once(':') {
        Some((artifact, format)) => (artifact, Some(format)),
        None => (arg, None),
    };

    let artifact = Artifact::parse(artifact_name)?;
    let format = format_name
        .map(DownloadFormat::parse)
        .unwrap_or(DownloadFormat::Txt);

    let content = match artifact {
        Artifact::Cleaned => results.cleaned.clone(),
        Artifact::Rewritten => results.rewritten.clone(),
        Artifact::Final => results.final_resume.clone(),
        Artifact::Evaluation => evaluation_text.to_string(),
    };

    Ok(ExportRequest {
        content,
        filename: artifact.filename(format),
        format,
    })
}

/// Runs all requested exports as independent concurrent tasks. A failed
/// export is reported on stderr and affects neither the rendered results
/// nor the other exports.
async fn run_exports(cli: &Cli, client: Arc<ApiClient>, results: &ResultBundle) {
    if cli.exports.is_empty() {
        return;
    }

    let evaluation_text =
        render::render_evaluation(&evaluation::normalize_evaluation(&results.evaluation));

    let mut handles = Vec::new();
    for arg in &cli.exports {
        let request = match build_export(arg, results, &evaluation_text) {
            Ok(request) => request,
            Err(e) => {
                error!("{e}");
                continue;
            }
        };
        let client = Arc::clone(&client);
        let out_dir = cli.out_dir.clone();
        handles.push(tokio::spawn(async move {
            export_artifact(&client, &request, &out_dir).await
        }));
    }

    for handle in handles {
        match handle.await {
            Ok(Ok(path)) => println!("Saved {}", path.display()),
            Ok(Err(e)) => eprintln!("{e}"),
            Err(e) => eprintln!("export task failed: {e}"),
        }
    }
}

async fn export_artifact(
    client: &ApiClient,
    request: &ExportRequest,
    out_dir: &Path,
) -> Result<PathBuf, AppError> {
    let payload = client.download(request).await?;
    let path = save_payload(&payload, out_dir, &request.filename).await?;
    info!(bytes = payload.len(), file = %path.display(), "export written");
    Ok(path)
}

async fn save_payload(
    payload: &[u8],
    out_dir: &Path,
    filename: &str,
) -> Result<PathBuf, AppError> {
    let path = out_dir.join(filename);
    tokio::fs::write(&path, payload).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_results() -> ResultBundle {
        ResultBundle {
            cleaned: "cleaned text".to_string(),
            rewritten: "rewritten text".to_string(),
            final_resume: "final text".to_string(),
            evaluation: json!({"overall_score": 82}),
        }
    }

    #[test]
    fn test_build_export_selects_artifact_content_and_filename() {
        let request = build_export("final:docx", &sample_results(), "eval text").unwrap();
        assert_eq!(request.content, "final text");
        assert_eq!(request.filename, "final_resume.docx");
        assert_eq!(request.format, DownloadFormat::Docx);
    }

    #[test]
    fn test_build_export_defaults_to_txt_without_format() {
        let request = build_export("cleaned", &sample_results(), "eval text").unwrap();
        assert_eq!(request.format, DownloadFormat::Txt);
        assert_eq!(request.filename, "cleaned_resume.txt");
    }

    #[test]
    fn test_build_export_unknown_format_falls_back_to_txt() {
        let request = build_export("rewritten:odt", &sample_results(), "eval text").unwrap();
        assert_eq!(request.format, DownloadFormat::Txt);
    }

    #[test]
    fn test_build_export_uses_rendered_evaluation_content() {
        let request = build_export("evaluation:pdf", &sample_results(), "rendered eval").unwrap();
        assert_eq!(request.content, "rendered eval");
        assert_eq!(request.filename, "ats_evaluation.pdf");
    }

    #[test]
    fn test_build_export_rejects_unknown_artifact() {
        let err = build_export("resume", &sample_results(), "eval").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_save_payload_writes_to_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_payload(b"%PDF-1.4 payload", dir.path(), "final_resume.pdf")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("final_resume.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 payload");
    }
}
