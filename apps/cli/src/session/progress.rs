//! Simulated step-progress for the long-running submission.
//!
//! The cadence is cosmetic: it carries no information about actual backend
//! progress. The ticker advances one label per [`STEP_INTERVAL`] and holds
//! at the last in-flight label; the terminal label is only ever applied by
//! the settlement path in the session, never by the ticker itself.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use tracing::info;

use super::{Phase, ProcessingState};

/// Wall time between simulated step advances.
pub const STEP_INTERVAL: Duration = Duration::from_secs(15);

/// The fixed six-label sequence shown while a submission is in flight.
pub const STEP_LABELS: [&str; 6] = [
    "Initializing AI agents...",
    "Stage 1/4: Parsing and cleaning resume...",
    "Stage 2/4: ATS optimization...",
    "Stage 3/4: Bullet point refinement...",
    "Stage 4/4: Final ATS evaluation...",
    "Complete!",
];

/// Index of the terminal label within [`STEP_LABELS`].
pub const COMPLETE_STEP: usize = STEP_LABELS.len() - 1;

/// Cancellable periodic timer that advances the step label while a
/// submission is in flight.
pub struct ProgressTicker {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Spawns the ticker task. The session has already set the first label;
    /// ticks advance from there.
    pub fn start(state: Arc<Mutex<ProcessingState>>) -> Self {
        let (cancel, mut cancelled) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(STEP_INTERVAL);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = cancelled.changed() => break,
                    _ = interval.tick() => {
                        let mut state = state.lock().expect("state mutex poisoned");
                        // A tick racing settlement must be a no-op.
                        if state.phase != Phase::InFlight {
                            break;
                        }
                        if let Some(step) = state.step {
                            if step + 1 < COMPLETE_STEP {
                                state.step = Some(step + 1);
                                info!("{}", STEP_LABELS[step + 1]);
                            }
                        }
                    }
                }
            }
        });
        Self { cancel, handle }
    }

    /// Cancels the ticker and waits for the task to exit, so no tick can
    /// land after the request has settled.
    pub async fn cancel(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_flight_state() -> Arc<Mutex<ProcessingState>> {
        Arc::new(Mutex::new(ProcessingState {
            phase: Phase::InFlight,
            step: Some(0),
            error: None,
        }))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_advances_one_step_per_interval() {
        let state = in_flight_state();
        let ticker = ProgressTicker::start(Arc::clone(&state));

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(state.lock().unwrap().step, Some(2));

        ticker.cancel().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_holds_at_last_in_flight_label() {
        let state = in_flight_state();
        let ticker = ProgressTicker::start(Arc::clone(&state));

        // Far longer than the whole sequence; the terminal label is never
        // reached by the ticker alone.
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(state.lock().unwrap().step, Some(COMPLETE_STEP - 1));

        ticker.cancel().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_after_settlement_is_a_noop() {
        let state = in_flight_state();
        let ticker = ProgressTicker::start(Arc::clone(&state));

        {
            let mut state = state.lock().unwrap();
            state.phase = Phase::Complete;
            state.step = Some(COMPLETE_STEP);
        }

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(state.lock().unwrap().step, Some(COMPLETE_STEP));

        ticker.cancel().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_future_advances() {
        let state = in_flight_state();
        let ticker = ProgressTicker::start(Arc::clone(&state));

        tokio::time::sleep(Duration::from_secs(16)).await;
        assert_eq!(state.lock().unwrap().step, Some(1));

        ticker.cancel().await;

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(state.lock().unwrap().step, Some(1));
    }
}
