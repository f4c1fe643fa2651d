//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;

/// Submit a resume against a target job and export the optimized artifacts.
#[derive(Debug, Parser)]
#[command(name = "tailor", version, about = "ATS resume optimization client")]
pub struct Cli {
    /// Path to the resume file to process.
    pub resume: Option<PathBuf>,

    /// Target job title.
    #[arg(short = 't', long)]
    pub job_title: Option<String>,

    /// Target job description, inline.
    #[arg(short = 'd', long, conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file instead.
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    /// Export an artifact after processing, as ARTIFACT[:FORMAT].
    /// Artifacts: cleaned, rewritten, final, evaluation.
    /// Formats: txt (default), pdf, docx.
    #[arg(long = "export", value_name = "ARTIFACT[:FORMAT]")]
    pub exports: Vec<String>,

    /// Directory exported files are written to.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Only check that the backend is reachable, then exit.
    #[arg(long)]
    pub check: bool,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}
