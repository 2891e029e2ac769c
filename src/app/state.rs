//! Application state definitions

use crate::curriculum::TopicGraph;
use crate::progress::Progress;
use crate::quiz::{QuizComposer, QuizSession};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Language picker
    #[default]
    Languages,
    /// Topic list for the chosen language
    Dashboard,
    /// Quiz session (all phases)
    Quiz,
    /// Custom quiz topic selection
    Composer,
}

/// Status line shown at the bottom of every screen
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Message to display, if any
    pub message: Option<String>,
    /// Whether the message is an error
    pub is_error: bool,
}

impl StatusLine {
    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Clear the message
    pub fn clear(&mut self) {
        self.message = None;
        self.is_error = false;
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Selected row in the language picker
    pub language_selected: usize,

    /// Topic graph for the chosen language
    pub graph: Option<TopicGraph>,

    /// Selected row on the dashboard
    pub dashboard_selected: usize,

    /// Local progress cache, refreshed from the service
    pub progress: Progress,

    /// The active quiz session, exclusively owned by this view.
    /// Discarded on navigation away or after results.
    pub session: Option<QuizSession>,

    /// Generation counter for the active session. Timer ticks and network
    /// outcomes carry the epoch they were started under; anything tagged
    /// with an older epoch is stale and dropped.
    pub session_epoch: u64,

    /// Custom quiz selection state
    pub composer: Option<QuizComposer>,

    /// Selected row in the composer
    pub composer_selected: usize,

    /// Whether keystrokes edit the current free-text answer
    pub insert_mode: bool,

    /// Scroll offset in the results review
    pub results_scroll: u16,

    /// Status line
    pub status: StatusLine,
}

impl AppState {
    /// The chosen language, if past the picker
    pub fn language(&self) -> Option<&str> {
        self.graph.as_ref().map(|g| g.language.as_str())
    }

    /// Discard the active session and invalidate its epoch, so late timer
    /// ticks or network results for it become no-ops.
    pub fn drop_session(&mut self) {
        self.session = None;
        self.session_epoch += 1;
        self.insert_mode = false;
        self.results_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_starts_on_language_picker() {
        let state = AppState::default();
        assert_eq!(state.screen, Screen::Languages);
        assert!(state.session.is_none());
    }

    #[test]
    fn drop_session_invalidates_epoch() {
        let mut state = AppState::default();
        let epoch = state.session_epoch;
        state.insert_mode = true;
        state.drop_session();
        assert!(state.session_epoch > epoch);
        assert!(!state.insert_mode);
    }

    #[test]
    fn status_line_tracks_error_flag() {
        let mut status = StatusLine::default();
        status.set_error("boom");
        assert!(status.is_error);
        status.set_message("ok");
        assert!(!status.is_error);
        status.clear();
        assert!(status.message.is_none());
    }
}
