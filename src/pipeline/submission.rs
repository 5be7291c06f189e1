//! Background task for one submission attempt
//!
//! The remote call and the progress ticker run in one task joined by a
//! `select!`. The ticker lives only inside the loop, so once the call
//! settles no further tick can be emitted. Events go back to the UI over a
//! channel, tagged with the attempt id.

use super::fallback;
use super::progress::PipelineTiming;
use super::status::SettlementKind;
use crate::estimator::{AnalyzeRequest, RemoteEstimator};
use crate::state::{FormState, PlanDocument, PlanSource};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Identifies one submit action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classified outcome of the network call
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The service returned a plan
    Remote,
    /// The service was unavailable; a fallback plan follows
    Fallback { reason: String },
    /// Unclassified failure, shown to the user
    Unexpected { message: String },
}

impl Settlement {
    pub fn kind(&self) -> SettlementKind {
        match self {
            Self::Remote => SettlementKind::Success,
            Self::Fallback { .. } => SettlementKind::Degraded,
            Self::Unexpected { .. } => SettlementKind::Unexpected,
        }
    }
}

/// Messages from a submission task to the wizard
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Tick {
        attempt: AttemptId,
    },
    Settled {
        attempt: AttemptId,
        settlement: Settlement,
    },
    /// Emitted after the confirmation delay; carries the plan to hand off
    HandOffReady {
        attempt: AttemptId,
        plan: PlanDocument,
        source: PlanSource,
    },
}

impl PipelineEvent {
    pub fn attempt(&self) -> AttemptId {
        match self {
            Self::Tick { attempt }
            | Self::Settled { attempt, .. }
            | Self::HandOffReady { attempt, .. } => *attempt,
        }
    }
}

/// Handle to a running attempt; dropping it cancels the attempt
pub struct SubmissionTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl SubmissionTask {
    pub fn spawn(
        attempt: AttemptId,
        estimator: Arc<dyn RemoteEstimator>,
        request: AnalyzeRequest,
        form: FormState,
        timing: PipelineTiming,
        events: UnboundedSender<PipelineEvent>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            attempt,
            estimator,
            request,
            form,
            timing,
            events,
            cancel.clone(),
        ));
        Self { cancel, handle }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

impl Drop for SubmissionTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn emit(events: &UnboundedSender<PipelineEvent>, event: PipelineEvent) -> bool {
    events.send(event).is_ok()
}

async fn run(
    attempt: AttemptId,
    estimator: Arc<dyn RemoteEstimator>,
    request: AnalyzeRequest,
    form: FormState,
    timing: PipelineTiming,
    events: UnboundedSender<PipelineEvent>,
    cancel: CancellationToken,
) {
    let outcome = {
        let call = estimator.analyze(&request);
        tokio::pin!(call);

        let mut ticker = time::interval_at(Instant::now() + timing.tick, timing.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(%attempt, "submission cancelled while in flight");
                    return;
                }
                result = &mut call => break result,
                _ = ticker.tick() => {
                    if !emit(&events, PipelineEvent::Tick { attempt }) {
                        return;
                    }
                }
            }
        }
    };

    let hand_off = match outcome {
        Ok(plan) => {
            tracing::info!(%attempt, "estimation service returned a plan");
            emit(
                &events,
                PipelineEvent::Settled {
                    attempt,
                    settlement: Settlement::Remote,
                },
            );
            Some((plan, PlanSource::Remote))
        }
        Err(err) if err.is_degraded() => {
            tracing::warn!(%attempt, error = %err, "estimation service unavailable, using fallback plan");
            let plan = fallback::synthesize(&form);
            emit(
                &events,
                PipelineEvent::Settled {
                    attempt,
                    settlement: Settlement::Fallback {
                        reason: err.to_string(),
                    },
                },
            );
            Some((plan, PlanSource::Fallback))
        }
        Err(err) => {
            tracing::error!(%attempt, error = %err, "plan generation failed");
            let message = err.to_string();
            let message = if message.trim().is_empty() {
                "Failed to generate plan".to_string()
            } else {
                message
            };
            emit(
                &events,
                PipelineEvent::Settled {
                    attempt,
                    settlement: Settlement::Unexpected { message },
                },
            );
            None
        }
    };

    if let Some((plan, source)) = hand_off {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = time::sleep(timing.confirm_delay) => {}
        }
        emit(
            &events,
            PipelineEvent::HandOffReady {
                attempt,
                plan,
                source,
            },
        );
    }
}
