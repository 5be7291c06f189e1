//! Application state and core logic

use crate::estimator::RemoteEstimator;
use crate::pipeline::{HandOff, PipelineTiming, SubmissionPipeline, SubmissionStatus, SubmitOutcome};
use crate::platform;
use crate::state::forms::{catalog, on_advance_key, Advance};
use crate::state::{AppState, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Validation, remote call and fallback for the wizard
    pipeline: SubmissionPipeline,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(estimator: Arc<dyn RemoteEstimator>) -> Self {
        Self::with_timing(estimator, PipelineTiming::default())
    }

    pub fn with_timing(estimator: Arc<dyn RemoteEstimator>, timing: PipelineTiming) -> Self {
        Self {
            state: AppState::default(),
            pipeline: SubmissionPipeline::new(estimator, timing),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Stop the event loop, abandoning any running submission
    pub fn quit(&mut self) {
        self.pipeline.cancel();
        self.quit = true;
    }

    /// A submission is between validation and its outcome
    pub fn is_busy(&self) -> bool {
        self.pipeline.is_busy()
    }

    pub fn submission_status(&self) -> SubmissionStatus {
        self.pipeline.status()
    }

    /// Apply pipeline events, keep the progress bar on target and drop
    /// expired toasts. Called once per frame.
    pub fn update(&mut self) {
        if let Some(hand_off) = self.pipeline.drain(&mut self.state.notifications) {
            self.accept_hand_off(hand_off);
        }
        self.sync_progress_bar();
        self.state.notifications.expire(Instant::now());
    }

    fn sync_progress_bar(&mut self) {
        let progress = self.pipeline.progress();
        let bar = &mut self.state.wizard.progress_bar;
        if self.pipeline.is_busy() {
            bar.set_target(progress);
        } else if progress == 0 {
            bar.reset();
        }
    }

    fn accept_hand_off(&mut self, hand_off: HandOff) {
        match View::from_route(hand_off.route) {
            Some(View::Results) => {
                self.state.show_results(hand_off.plan, hand_off.source);
            }
            _ => {
                tracing::warn!(route = hand_off.route, "hand-off to an unknown route");
            }
        }
    }

    fn submit(&mut self) {
        let wizard = &mut self.state.wizard;
        match self
            .pipeline
            .submit(&wizard.form, &mut self.state.notifications)
        {
            SubmitOutcome::Started => {
                wizard.errors.clear();
                wizard.tooltip = None;
                wizard.progress_bar.reset();
            }
            SubmitOutcome::Invalid(errors) => {
                let first_invalid = catalog()
                    .order()
                    .iter()
                    .copied()
                    .find(|name| errors.contains_key(name));
                if let Some(first) = first_invalid {
                    wizard.focus.focus(first);
                }
                wizard.errors = errors;
            }
            SubmitOutcome::Ignored => {}
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if platform::is_quit_chord(&key) {
            self.quit();
            return;
        }

        match self.state.current_view {
            View::Wizard => self.handle_wizard_key(key),
            View::Results => self.handle_results_key(key),
        }
    }

    /// Handle keys in the form wizard
    fn handle_wizard_key(&mut self, key: KeyEvent) {
        if platform::is_submit_shortcut(&key) {
            self.submit();
            return;
        }

        let busy = self.pipeline.is_busy();
        let wizard = &mut self.state.wizard;
        let focused = wizard.focus.focused();

        match key.code {
            KeyCode::F(1) => wizard.toggle_tooltip(),
            KeyCode::Esc => {
                if wizard.tooltip.is_some() {
                    wizard.tooltip = None;
                } else {
                    wizard.focus.blur();
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                wizard.tooltip = None;
                wizard.focus.cycle(true);
            }
            KeyCode::BackTab | KeyCode::Up => {
                wizard.tooltip = None;
                wizard.focus.cycle(false);
            }
            KeyCode::Enter => match focused {
                None => self.submit(),
                Some(field) => {
                    wizard.tooltip = None;
                    if on_advance_key(&mut wizard.focus, field) == Advance::Submit {
                        self.submit();
                    }
                }
            },
            KeyCode::Char('q') if focused.is_none() => self.quit(),
            // Editing is locked while a submission runs
            _ if busy => {}
            KeyCode::Left | KeyCode::Right => {
                if let Some(field) = focused {
                    wizard
                        .form
                        .cycle_option(field, key.code == KeyCode::Right);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = focused {
                    wizard.form.pop_char(field);
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(field) = focused {
                    wizard.form.push_char(field, c);
                }
            }
            _ => {}
        }
    }

    /// Handle keys in the results view
    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(results) = self.state.results.as_mut() {
                    results.scroll_down();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(results) = self.state.results.as_mut() {
                    results.scroll_up();
                }
            }
            KeyCode::Esc | KeyCode::Char('b') => {
                self.pipeline.cancel();
                self.state.back_to_wizard();
            }
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }
}
