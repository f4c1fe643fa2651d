#![allow(dead_code)]

//! Submission Controller: owns the form state, validates preconditions,
//! drives the single in-flight request, and races the simulated progress
//! ticker against settlement.

pub mod progress;

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::api_client::ResumeProcessor;
use crate::errors::AppError;
use crate::models::{ResultBundle, SubmissionInput};

use self::progress::{ProgressTicker, COMPLETE_STEP, STEP_LABELS};

pub const MISSING_FILE_MSG: &str = "Please provide a resume file.";
pub const MISSING_JOB_INFO_MSG: &str = "Please provide both job title and job description.";

/// Where the controller currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    InFlight,
    Complete,
    /// Equivalent to Idle for submission purposes; the error is preserved
    /// for display until the next submit attempt.
    Failed,
}

/// The aggregate both the ticker and the settlement path mutate. The lock is
/// only ever held for synchronous reads/writes, never across an await.
#[derive(Debug, Default)]
pub struct ProcessingState {
    pub phase: Phase,
    /// Index into [`STEP_LABELS`]; `None` outside a submission lifecycle.
    pub step: Option<usize>,
    pub error: Option<String>,
}

impl ProcessingState {
    pub fn step_label(&self) -> Option<&'static str> {
        self.step.map(|i| STEP_LABELS[i])
    }
}

/// One user session: form input, processing state, and at most one result
/// bundle. Cloneable; all clones share the same underlying state.
#[derive(Clone)]
pub struct Session {
    backend: Arc<dyn ResumeProcessor>,
    input: Arc<Mutex<SubmissionInput>>,
    state: Arc<Mutex<ProcessingState>>,
    results: Arc<Mutex<Option<ResultBundle>>>,
}

impl Session {
    pub fn new(backend: Arc<dyn ResumeProcessor>) -> Self {
        Self {
            backend,
            input: Arc::new(Mutex::new(SubmissionInput::default())),
            state: Arc::new(Mutex::new(ProcessingState::default())),
            results: Arc::new(Mutex::new(None)),
        }
    }

    fn state(&self) -> MutexGuard<'_, ProcessingState> {
        self.state.lock().expect("state mutex poisoned")
    }

    pub fn set_input(&self, input: SubmissionInput) {
        *self.input.lock().expect("input mutex poisoned") = input;
    }

    pub fn input(&self) -> SubmissionInput {
        self.input.lock().expect("input mutex poisoned").clone()
    }

    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    pub fn step_label(&self) -> Option<&'static str> {
        self.state().step_label()
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn results(&self) -> Option<ResultBundle> {
        self.results.lock().expect("results mutex poisoned").clone()
    }

    /// Validates the stored input and, if it passes, runs the single
    /// processing request while the progress ticker simulates pipeline
    /// stages. Only one submission may be in flight at a time; a concurrent
    /// call is rejected outright, not queued.
    ///
    /// File presence is checked before the text fields, so when both are
    /// wrong only the file-missing message is reported.
    pub async fn submit(&self) -> Result<(), AppError> {
        let (file, job_title, job_description) = {
            let mut state = self.state();
            if state.phase == Phase::InFlight {
                return Err(AppError::InFlight);
            }
            state.phase = Phase::Validating;

            let input = self.input.lock().expect("input mutex poisoned").clone();
            let Some(file) = input.file else {
                state.phase = Phase::Idle;
                state.error = Some(MISSING_FILE_MSG.to_string());
                return Err(AppError::Validation(MISSING_FILE_MSG.to_string()));
            };
            if input.job_title.trim().is_empty() || input.job_description.trim().is_empty() {
                state.phase = Phase::Idle;
                state.error = Some(MISSING_JOB_INFO_MSG.to_string());
                return Err(AppError::Validation(MISSING_JOB_INFO_MSG.to_string()));
            }

            state.phase = Phase::InFlight;
            state.error = None;
            state.step = Some(0);
            (file, input.job_title, input.job_description)
        };

        // A fresh submission fully replaces the prior bundle.
        *self.results.lock().expect("results mutex poisoned") = None;
        info!("{}", STEP_LABELS[0]);

        let ticker = ProgressTicker::start(Arc::clone(&self.state));
        let outcome = self
            .backend
            .process(&file, &job_title, &job_description)
            .await;
        // Settlement: the ticker is cancelled unconditionally, success or
        // failure, before the state transition.
        ticker.cancel().await;

        match outcome {
            Ok(bundle) => {
                {
                    let mut state = self.state();
                    state.phase = Phase::Complete;
                    state.step = Some(COMPLETE_STEP);
                }
                info!("{}", STEP_LABELS[COMPLETE_STEP]);
                *self.results.lock().expect("results mutex poisoned") = Some(bundle);
                Ok(())
            }
            Err(e) => {
                warn!("processing failed: {e}");
                let mut state = self.state();
                state.phase = Phase::Failed;
                state.step = None;
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Returns the session to its initial state: input, processing state,
    /// and result bundle are all discarded. Idempotent; no network involved.
    pub fn reset(&self) {
        *self.input.lock().expect("input mutex poisoned") = SubmissionInput::default();
        {
            let mut state = self.state();
            state.phase = Phase::Idle;
            state.step = None;
            state.error = None;
        }
        *self.results.lock().expect("results mutex poisoned") = None;
    }
}
