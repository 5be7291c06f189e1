//! Submission status and its transition function

/// Lifecycle of one submit action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Validating,
    InFlight,
    /// The service returned a plan; hand-off pending
    Succeeding,
    /// The call failed; either a fallback hand-off or an error report follows
    Failed,
}

/// How a network call settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementKind {
    Success,
    /// Service unavailable; a fallback plan replaces the response
    Degraded,
    Unexpected,
}

/// Inputs to the status machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    ValidationFailed,
    ValidationPassed,
    Settled(SettlementKind),
    /// A plan was handed to navigation
    HandedOff,
    /// An unexpected failure was shown to the user
    Reported,
    /// The hosting view was torn down
    Cancelled,
}

impl SubmissionStatus {
    /// Next status for `event`, or `None` when the event is not valid here
    pub fn next(self, event: SubmissionEvent) -> Option<SubmissionStatus> {
        use SubmissionEvent as E;
        use SubmissionStatus as S;

        match (self, event) {
            (S::Idle, E::Submit) => Some(S::Validating),
            (S::Validating, E::ValidationFailed) => Some(S::Idle),
            (S::Validating, E::ValidationPassed) => Some(S::InFlight),
            (S::InFlight, E::Settled(SettlementKind::Success)) => Some(S::Succeeding),
            (S::InFlight, E::Settled(_)) => Some(S::Failed),
            (S::Succeeding | S::Failed, E::HandedOff) => Some(S::Idle),
            (S::Failed, E::Reported) => Some(S::Idle),
            (_, E::Cancelled) => Some(S::Idle),
            _ => None,
        }
    }

    /// Only an idle wizard starts a new submission
    pub fn accepts_submit(self) -> bool {
        self == Self::Idle
    }

    /// A submission is between validation and its outcome
    pub fn is_busy(self) -> bool {
        !matches!(self, Self::Idle)
    }
}
