//! Submission pipeline
//!
//! Validates the form, runs the estimation call in a background task with
//! simulated progress, classifies the outcome and hands the resulting plan
//! to navigation. A degraded service is replaced by a locally synthesized
//! plan so the user always reaches the results view.

pub mod fallback;
mod progress;
mod status;
mod submission;

pub use progress::{PipelineTiming, Progress};
pub use status::{SettlementKind, SubmissionEvent, SubmissionStatus};
pub use submission::{AttemptId, PipelineEvent, Settlement, SubmissionTask};

use crate::estimator::{AnalyzeRequest, RemoteEstimator};
use crate::state::forms::{validate, ErrorMap};
use crate::state::notifications::{NotificationSink, Severity};
use crate::state::{FormState, PlanDocument, PlanSource};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Route the results view is reached through
pub const RESULTS_ROUTE: &str = "/results";

pub const VALIDATION_FAILED_MESSAGE: &str = "Please fix the form errors";
pub const SUCCESS_MESSAGE: &str = "Plan generated successfully!";
pub const FALLBACK_MESSAGE: &str = "Demo mode: Showing sample plan (API unavailable)";

/// Navigation request produced once per successful or degraded attempt
#[derive(Debug, Clone, PartialEq)]
pub struct HandOff {
    pub route: &'static str,
    pub plan: PlanDocument,
    pub source: PlanSource,
}

/// Result of a submit request
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A submission is already active
    Ignored,
    /// Validation failed; nothing was sent
    Invalid(ErrorMap),
    /// The request is in flight
    Started,
}

pub struct SubmissionPipeline {
    estimator: Arc<dyn RemoteEstimator>,
    timing: PipelineTiming,
    status: SubmissionStatus,
    progress: Progress,
    attempt: Option<AttemptId>,
    task: Option<SubmissionTask>,
    events_tx: UnboundedSender<PipelineEvent>,
    events_rx: UnboundedReceiver<PipelineEvent>,
}

impl SubmissionPipeline {
    pub fn new(estimator: Arc<dyn RemoteEstimator>, timing: PipelineTiming) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            estimator,
            timing,
            status: SubmissionStatus::Idle,
            progress: Progress::default(),
            attempt: None,
            task: None,
            events_tx,
            events_rx,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Progress percentage, 0..=100
    pub fn progress(&self) -> u8 {
        self.progress.value()
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    fn transition(&mut self, event: SubmissionEvent) -> bool {
        match self.status.next(event) {
            Some(next) => {
                tracing::debug!(from = ?self.status, to = ?next, ?event, "submission status");
                self.status = next;
                true
            }
            None => {
                tracing::debug!(status = ?self.status, ?event, "ignoring submission event");
                false
            }
        }
    }

    /// Validate `form` and start an attempt when it passes.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, form: &FormState, sink: &mut dyn NotificationSink) -> SubmitOutcome {
        if !self.status.accepts_submit() {
            tracing::debug!(status = ?self.status, "submit ignored while a submission is active");
            return SubmitOutcome::Ignored;
        }
        self.transition(SubmissionEvent::Submit);

        let errors = validate(form);
        if !errors.is_empty() {
            self.transition(SubmissionEvent::ValidationFailed);
            tracing::info!(fields = ?errors.keys().collect::<Vec<_>>(), "form validation failed");
            sink.notify(VALIDATION_FAILED_MESSAGE.to_string(), Severity::Error);
            return SubmitOutcome::Invalid(errors);
        }

        self.transition(SubmissionEvent::ValidationPassed);
        self.progress.reset();

        let attempt = AttemptId::new();
        tracing::info!(%attempt, "submitting project for estimation");
        self.task = Some(SubmissionTask::spawn(
            attempt,
            Arc::clone(&self.estimator),
            AnalyzeRequest::from_form(form),
            form.clone(),
            self.timing,
            self.events_tx.clone(),
        ));
        self.attempt = Some(attempt);
        SubmitOutcome::Started
    }

    /// Wait for the next event from a running attempt
    pub async fn next_event(&mut self) -> Option<PipelineEvent> {
        self.events_rx.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<PipelineEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Apply one event. Events from a cancelled or finished attempt are
    /// dropped.
    pub fn handle_event(
        &mut self,
        event: PipelineEvent,
        sink: &mut dyn NotificationSink,
    ) -> Option<HandOff> {
        if self.attempt != Some(event.attempt()) {
            tracing::trace!(attempt = %event.attempt(), "dropping event from a stale attempt");
            return None;
        }

        match event {
            PipelineEvent::Tick { .. } => {
                if self.status == SubmissionStatus::InFlight {
                    self.progress.advance(&self.timing);
                }
                None
            }
            PipelineEvent::Settled { settlement, .. } => {
                if !self.transition(SubmissionEvent::Settled(settlement.kind())) {
                    return None;
                }
                match settlement {
                    Settlement::Remote | Settlement::Fallback { .. } => {
                        self.progress.complete();
                    }
                    Settlement::Unexpected { message } => {
                        sink.notify(message, Severity::Error);
                        self.transition(SubmissionEvent::Reported);
                        self.finish();
                        self.progress.reset();
                    }
                }
                None
            }
            PipelineEvent::HandOffReady { plan, source, .. } => {
                if !self.transition(SubmissionEvent::HandedOff) {
                    return None;
                }
                let (message, severity) = match source {
                    PlanSource::Remote => (SUCCESS_MESSAGE, Severity::Success),
                    PlanSource::Fallback => (FALLBACK_MESSAGE, Severity::Success),
                };
                sink.notify(message.to_string(), severity);
                self.finish();
                tracing::info!(?source, route = RESULTS_ROUTE, "plan handed off");
                Some(HandOff {
                    route: RESULTS_ROUTE,
                    plan,
                    source,
                })
            }
        }
    }

    /// Apply every queued event; returns the hand-off if one arrived
    pub fn drain(&mut self, sink: &mut dyn NotificationSink) -> Option<HandOff> {
        let mut hand_off = None;
        while let Some(event) = self.try_next_event() {
            if let Some(h) = self.handle_event(event, sink) {
                hand_off.get_or_insert(h);
            }
        }
        hand_off
    }

    /// Abandon the active attempt; later events from it are ignored
    pub fn cancel(&mut self) {
        if self.task.is_none() && !self.status.is_busy() {
            return;
        }
        if let Some(attempt) = self.attempt {
            tracing::info!(%attempt, "submission cancelled");
        }
        self.transition(SubmissionEvent::Cancelled);
        self.finish();
        self.progress.reset();
    }

    fn finish(&mut self) {
        self.attempt = None;
        // dropping the handle cancels the task if it is still running
        self.task = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{EstimateError, MockRemoteEstimator};
    use crate::state::FieldName;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Default)]
    struct RecordingSink(Vec<(String, Severity)>);

    impl NotificationSink for RecordingSink {
        fn notify(&mut self, message: String, severity: Severity) {
            self.0.push((message, severity));
        }
    }

    /// Estimator that answers after a delay
    struct DelayedEstimator {
        delay: Duration,
        outcome: fn() -> Result<PlanDocument, EstimateError>,
        calls: AtomicUsize,
    }

    impl DelayedEstimator {
        fn new(delay: Duration, outcome: fn() -> Result<PlanDocument, EstimateError>) -> Self {
            Self {
                delay,
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RemoteEstimator for DelayedEstimator {
        async fn analyze(&self, _request: &AnalyzeRequest) -> Result<PlanDocument, EstimateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            (self.outcome)()
        }
    }

    fn valid_form() -> FormState {
        FormState::new()
            .with(FieldName::BuiltUpArea, "2000")
            .with(FieldName::Floors, "G+2")
            .with(FieldName::Duration, "180")
            .with(FieldName::Location, "Pune")
            .with(FieldName::Budget, "5000000")
    }

    fn remote_plan() -> PlanDocument {
        let mut plan = PlanDocument::default();
        plan.timeline.total_days = 99;
        plan
    }

    fn pipeline_with(estimator: impl RemoteEstimator + 'static) -> SubmissionPipeline {
        SubmissionPipeline::new(Arc::new(estimator), PipelineTiming::default())
    }

    fn mock_returning(
        outcome: fn() -> Result<PlanDocument, EstimateError>,
    ) -> MockRemoteEstimator {
        let mut mock = MockRemoteEstimator::new();
        mock.expect_analyze()
            .times(1)
            .returning(move |_| outcome());
        mock
    }

    async fn run_to_completion(
        pipeline: &mut SubmissionPipeline,
        sink: &mut RecordingSink,
    ) -> Option<HandOff> {
        while pipeline.is_busy() {
            let event = pipeline.next_event().await?;
            if let Some(hand_off) = pipeline.handle_event(event, sink) {
                return Some(hand_off);
            }
        }
        None
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_makes_no_call() {
        let mut mock = MockRemoteEstimator::new();
        mock.expect_analyze().times(0);
        let mut pipeline = pipeline_with(mock);
        let mut sink = RecordingSink::default();

        let form = valid_form().with(FieldName::BuiltUpArea, "");
        let errors = match pipeline.submit(&form, &mut sink) {
            SubmitOutcome::Invalid(errors) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        };
        assert_eq!(
            errors.get(&FieldName::BuiltUpArea).map(String::as_str),
            Some("Valid built-up area is required")
        );
        assert_eq!(pipeline.status(), SubmissionStatus::Idle);
        assert_eq!(
            sink.0,
            vec![(VALIDATION_FAILED_MESSAGE.to_string(), Severity::Error)]
        );

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(pipeline.try_next_event().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_service_hands_off_fallback_plan() {
        let mut pipeline = pipeline_with(mock_returning(|| {
            Err(EstimateError::Unreachable("connection refused".into()))
        }));
        let mut sink = RecordingSink::default();

        assert_eq!(pipeline.submit(&valid_form(), &mut sink), SubmitOutcome::Started);
        let hand_off = run_to_completion(&mut pipeline, &mut sink)
            .await
            .expect("fallback hand-off");

        assert_eq!(hand_off.route, RESULTS_ROUTE);
        assert_eq!(hand_off.source, PlanSource::Fallback);
        let days: Vec<u32> = hand_off.plan.timeline.phases.iter().map(|p| p.days).collect();
        assert_eq!(days, vec![27, 81, 54, 18]);
        assert_eq!(hand_off.plan.timeline.total_days, 180);
        assert_eq!(sink.0, vec![(FALLBACK_MESSAGE.to_string(), Severity::Success)]);
        assert_eq!(pipeline.status(), SubmissionStatus::Idle);
        assert_eq!(pipeline.progress(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_error_hands_off_fallback_plan() {
        let mut pipeline = pipeline_with(mock_returning(|| Err(EstimateError::Status(500))));
        let mut sink = RecordingSink::default();

        pipeline.submit(&valid_form(), &mut sink);
        let hand_off = run_to_completion(&mut pipeline, &mut sink).await.unwrap();

        assert_eq!(hand_off.source, PlanSource::Fallback);
        assert!(sink.0.iter().all(|(_, severity)| *severity != Severity::Error));
        assert_eq!(pipeline.progress(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_hands_off_remote_plan() {
        let mut pipeline = pipeline_with(mock_returning(|| Ok(remote_plan())));
        let mut sink = RecordingSink::default();

        pipeline.submit(&valid_form(), &mut sink);
        let hand_off = run_to_completion(&mut pipeline, &mut sink).await.unwrap();

        assert_eq!(hand_off.source, PlanSource::Remote);
        assert_eq!(hand_off.plan, remote_plan());
        assert_eq!(sink.0, vec![(SUCCESS_MESSAGE.to_string(), Severity::Success)]);
        assert_eq!(pipeline.progress(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_response_reports_error_without_hand_off() {
        let mut pipeline = pipeline_with(mock_returning(|| {
            Err(EstimateError::Malformed("missing field `timeline`".into()))
        }));
        let mut sink = RecordingSink::default();

        pipeline.submit(&valid_form(), &mut sink);
        let hand_off = run_to_completion(&mut pipeline, &mut sink).await;

        assert!(hand_off.is_none());
        assert_eq!(pipeline.status(), SubmissionStatus::Idle);
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].1, Severity::Error);
        assert!(sink.0[0].0.contains("missing field `timeline`"));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(pipeline.drain(&mut sink).is_none());
        assert!(pipeline.status().accepts_submit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_while_busy_is_ignored() {
        let estimator = Arc::new(DelayedEstimator::new(Duration::from_secs(2), || {
            Ok(remote_plan())
        }));
        let mut pipeline = SubmissionPipeline::new(estimator.clone(), PipelineTiming::default());
        let mut sink = RecordingSink::default();

        assert_eq!(pipeline.submit(&valid_form(), &mut sink), SubmitOutcome::Started);
        tokio::task::yield_now().await;
        assert_eq!(pipeline.submit(&valid_form(), &mut sink), SubmitOutcome::Ignored);

        let hand_off = run_to_completion(&mut pipeline, &mut sink).await;
        assert!(hand_off.is_some());
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.0.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_is_monotonic_and_completes_on_settle() {
        let estimator = DelayedEstimator::new(Duration::from_millis(1000), || Ok(remote_plan()));
        let mut pipeline = pipeline_with(estimator);
        let mut sink = RecordingSink::default();

        pipeline.submit(&valid_form(), &mut sink);
        assert_eq!(pipeline.progress(), 0);

        let mut observed = Vec::new();
        loop {
            let event = pipeline.next_event().await.unwrap();
            let settled = matches!(event, PipelineEvent::Settled { .. });
            let hand_off = pipeline.handle_event(event, &mut sink);
            observed.push(pipeline.progress());
            if settled {
                break;
            }
            assert!(hand_off.is_none());
            assert!(pipeline.progress() < 100);
        }

        assert_eq!(observed, vec![10, 20, 30, 100]);
        assert!(observed.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Apply events up to and including the settlement, recording progress after each
    async fn progress_until_settled(
        pipeline: &mut SubmissionPipeline,
        sink: &mut RecordingSink,
    ) -> Vec<u8> {
        let mut observed = Vec::new();
        loop {
            let event = pipeline.next_event().await.unwrap();
            let settled = matches!(event, PipelineEvent::Settled { .. });
            pipeline.handle_event(event, sink);
            observed.push(pipeline.progress());
            if settled {
                return observed;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_degraded_settlement_completes_progress() {
        for outcome in [
            (|| Err(EstimateError::Unreachable("refused".into())))
                as fn() -> Result<PlanDocument, EstimateError>,
            || Err(EstimateError::Status(500)),
        ] {
            let estimator = DelayedEstimator::new(Duration::from_millis(700), outcome);
            let mut pipeline = pipeline_with(estimator);
            let mut sink = RecordingSink::default();

            pipeline.submit(&valid_form(), &mut sink);
            assert_eq!(pipeline.progress(), 0);
            let observed = progress_until_settled(&mut pipeline, &mut sink).await;
            assert_eq!(observed, vec![10, 20, 100]);

            let hand_off = run_to_completion(&mut pipeline, &mut sink).await;
            assert_eq!(hand_off.map(|h| h.source), Some(PlanSource::Fallback));
            assert_eq!(pipeline.progress(), 100);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unexpected_settlement_clears_progress() {
        let estimator = DelayedEstimator::new(Duration::from_millis(700), || {
            Err(EstimateError::Malformed("expected value".into()))
        });
        let mut pipeline = pipeline_with(estimator);
        let mut sink = RecordingSink::default();

        pipeline.submit(&valid_form(), &mut sink);
        assert_eq!(pipeline.progress(), 0);
        let observed = progress_until_settled(&mut pipeline, &mut sink).await;

        assert_eq!(observed, vec![10, 20, 0]);
        assert!(!observed.contains(&100));
        assert_eq!(pipeline.status(), SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hand_off_waits_for_confirmation_delay() {
        let mut pipeline = pipeline_with(mock_returning(|| Ok(remote_plan())));
        let mut sink = RecordingSink::default();

        pipeline.submit(&valid_form(), &mut sink);
        let mut settled_at = None;
        loop {
            let event = pipeline.next_event().await.unwrap();
            if matches!(event, PipelineEvent::Settled { .. }) {
                settled_at = Some(Instant::now());
            }
            if pipeline.handle_event(event, &mut sink).is_some() {
                break;
            }
        }
        let waited = Instant::now() - settled_at.unwrap();
        assert!(waited >= Duration::from_millis(300), "waited {waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_ignores_late_events() {
        let estimator = DelayedEstimator::new(Duration::from_secs(10), || Ok(remote_plan()));
        let mut pipeline = pipeline_with(estimator);
        let mut sink = RecordingSink::default();

        pipeline.submit(&valid_form(), &mut sink);
        tokio::time::sleep(Duration::from_millis(700)).await;
        pipeline.cancel();
        assert_eq!(pipeline.status(), SubmissionStatus::Idle);
        assert_eq!(pipeline.progress(), 0);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(pipeline.drain(&mut sink).is_none());
        assert_eq!(pipeline.progress(), 0);
        assert!(sink.0.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_attempt_events_are_dropped() {
        let estimator = DelayedEstimator::new(Duration::from_secs(10), || Ok(remote_plan()));
        let mut pipeline = pipeline_with(estimator);
        let mut sink = RecordingSink::default();

        pipeline.submit(&valid_form(), &mut sink);
        let stale = PipelineEvent::Tick {
            attempt: AttemptId::new(),
        };
        assert!(pipeline.handle_event(stale, &mut sink).is_none());
        assert_eq!(pipeline.progress(), 0);
        pipeline.cancel();
    }
}
