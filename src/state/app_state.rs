//! Application state definitions

use super::forms::{ErrorMap, FieldName, FocusTracker, FormState, WizardStep};
use super::notifications::Notifications;
use super::plan::{PlanDocument, PlanSource};
use super::progress_bar::ProgressBar;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Project details form
    #[default]
    Wizard,
    /// Generated plan
    Results,
}

impl View {
    /// View reached through a navigation route
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            "/" | "/input" => Some(Self::Wizard),
            "/results" => Some(Self::Results),
            _ => None,
        }
    }
}

/// Everything the form wizard shows, apart from the submission pipeline
#[derive(Debug, Clone)]
pub struct WizardState {
    pub form: FormState,
    pub errors: ErrorMap,
    pub focus: FocusTracker,
    /// Field whose help tooltip is open
    pub tooltip: Option<FieldName>,
    pub progress_bar: ProgressBar,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            form: FormState::new(),
            errors: ErrorMap::new(),
            focus: FocusTracker::starting_at_first(),
            tooltip: None,
            progress_bar: ProgressBar::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.focus.current_step()
    }

    pub fn error(&self, name: FieldName) -> Option<&str> {
        self.errors.get(&name).map(String::as_str)
    }

    /// Toggle the tooltip of the focused field
    pub fn toggle_tooltip(&mut self) {
        self.tooltip = match (self.tooltip, self.focus.focused()) {
            (Some(_), _) => None,
            (None, focused) => focused,
        };
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// A handed-off plan and how far the results view is scrolled
#[derive(Debug, Clone)]
pub struct ResultsState {
    pub plan: PlanDocument,
    pub source: PlanSource,
    pub scroll: u16,
}

impl ResultsState {
    pub fn new(plan: PlanDocument, source: PlanSource) -> Self {
        Self {
            plan,
            source,
            scroll: 0,
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn is_fallback(&self) -> bool {
        self.source == PlanSource::Fallback
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub wizard: WizardState,
    pub results: Option<ResultsState>,
    pub notifications: Notifications,
}

impl AppState {
    /// Take ownership of a plan and switch to the results view
    pub fn show_results(&mut self, plan: PlanDocument, source: PlanSource) {
        self.results = Some(ResultsState::new(plan, source));
        self.current_view = View::Results;
    }

    /// Leave the results and mount a fresh wizard
    pub fn back_to_wizard(&mut self) {
        self.results = None;
        self.wizard = WizardState::new();
        self.current_view = View::Wizard;
    }
}
