//! Toast notifications

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Fire-and-forget notification sink
pub trait NotificationSink {
    fn notify(&mut self, message: String, severity: Severity);
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// Toast stack that dismisses entries after a fixed display duration
#[derive(Debug)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
    next_id: u64,
    duration: Duration,
}

impl Notifications {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            next_id: 0,
            duration,
        }
    }

    /// Add a toast shown at `now`
    pub fn push_at(&mut self, message: String, severity: Severity, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push_back(Toast {
            id,
            message,
            severity,
            shown_at: now,
        });
        id
    }

    /// Drop every toast whose display time has elapsed by `now`
    pub fn expire(&mut self, now: Instant) {
        let duration = self.duration;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < duration);
    }

    /// Toasts in display order, oldest first
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(TOAST_DURATION)
    }
}

impl NotificationSink for Notifications {
    fn notify(&mut self, message: String, severity: Severity) {
        tracing::debug!(severity = severity.label(), %message, "notification");
        self.push_at(message, severity, Instant::now());
    }
}
