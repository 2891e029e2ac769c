//! Application state and event handling
//!
//! The event loop owns the terminal and the single active quiz session.
//! Network calls run as spawned tasks that report back over a channel,
//! tagged with the session epoch they were started under; the loop drops
//! anything whose epoch no longer matches, so an abandoned session can
//! never be mutated by a late response or a stray timer tick.

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::curriculum::{self, resolver::resolve_status};
use crate::progress::{LanguageProgress, Progress};
use crate::quiz::{
    Difficulty, QuizComposer, QuizConfig, QuizPhase, QuizSession, QuizTarget, QuizTimer, Tick,
    TimerTick, config::ALLOWED_QUESTION_COUNTS,
};
use crate::service::{
    ServiceError, TutorClient,
    models::{Answer, GeneratedQuiz, Question, QuizResult, TopicsResponse, UserProgress},
};
use crate::theme::Theme;
use crate::ui;
use input::{Action, key_to_action};
use state::{AppState, Screen};

/// Outcome of a spawned network task, delivered back to the event loop
#[derive(Debug)]
pub enum EngineEvent {
    /// Quiz generation finished
    Generated {
        /// Session epoch the request was started under
        epoch: u64,
        /// Generated quiz or the failure to surface
        outcome: Result<GeneratedQuiz, ServiceError>,
    },
    /// Grading finished
    Graded {
        /// Session epoch the submission belongs to
        epoch: u64,
        /// Graded result or the failure to surface
        outcome: Result<QuizResult, ServiceError>,
    },
    /// Topics-with-progress fetch finished
    TopicsLoaded {
        /// Language that was queried
        language: String,
        /// Response or failure
        outcome: Result<TopicsResponse, ServiceError>,
    },
    /// User progress snapshot fetch finished
    ProgressLoaded(Result<UserProgress, ServiceError>),
    /// A fire-and-forget progress update was acknowledged (or not)
    ProgressAck(Result<(), ServiceError>),
}

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Active theme
    theme: Theme,

    /// Tutor service client, shared with spawned tasks
    client: Arc<TutorClient>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,

    /// Engine event channel
    events_tx: mpsc::Sender<EngineEvent>,
    events_rx: mpsc::Receiver<EngineEvent>,

    /// Countdown tick channel
    ticks_tx: mpsc::Sender<TimerTick>,
    ticks_rx: mpsc::Receiver<TimerTick>,

    /// Countdown task for the active session, if any
    timer: Option<QuizTimer>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let client = Arc::new(TutorClient::new(config.service_url.clone()));
        let (events_tx, events_rx) = mpsc::channel(32);
        let (ticks_tx, ticks_rx) = mpsc::channel(8);

        let mut state = AppState::default();
        state.progress = Progress::load().unwrap_or_default();

        Ok(Self {
            config,
            state,
            theme: Theme::default(),
            client,
            terminal,
            events_tx,
            events_rx,
            ticks_tx,
            ticks_rx,
            timer: None,
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        self.spawn_fetch_progress();

        loop {
            // Draw UI
            let state = &self.state;
            let theme = &self.theme;
            self.terminal.draw(|frame| {
                ui::draw(frame, state, theme);
            })?;

            // Handle key events
            let mut exit = false;
            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key.code) {
                            Ok(true) => exit = true,
                            Ok(false) => {}
                            Err(e) => {
                                tracing::error!("Error handling key: {}", e);
                                self.state.status.set_error(e.to_string());
                            }
                        }
                    }
                }
            }
            if exit {
                break;
            }

            // Countdown ticks
            while let Ok(tick) = self.ticks_rx.try_recv() {
                self.handle_tick(tick);
            }

            // Outcomes from spawned network tasks
            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_engine_event(event);
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    // ---- key handling ------------------------------------------------

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyCode) -> Result<bool> {
        // Free-text answer editing captures raw characters
        if self.state.insert_mode {
            self.handle_insert_key(key);
            return Ok(false);
        }

        let Some(action) = key_to_action(key) else {
            return Ok(false);
        };

        if action == Action::Quit && self.state.screen != Screen::Quiz {
            return Ok(true);
        }

        match self.state.screen {
            Screen::Languages => self.handle_languages_action(action),
            Screen::Dashboard => self.handle_dashboard_action(action),
            Screen::Composer => self.handle_composer_action(action),
            Screen::Quiz => self.handle_quiz_action(action),
        }
        Ok(false)
    }

    /// Append or delete characters in the current free-text answer
    fn handle_insert_key(&mut self, key: KeyCode) {
        let Some(session) = self.state.session.as_mut() else {
            self.state.insert_mode = false;
            return;
        };
        if session.phase() != QuizPhase::Active {
            self.state.insert_mode = false;
            return;
        }

        match key {
            KeyCode::Esc => self.state.insert_mode = false,
            KeyCode::Char(c) => {
                let mut text = match &session.answers()[session.current_index()] {
                    Answer::Code(existing) => existing.clone(),
                    _ => String::new(),
                };
                text.push(c);
                session.answer_current(Answer::Code(text));
            }
            KeyCode::Enter => {
                let mut text = match &session.answers()[session.current_index()] {
                    Answer::Code(existing) => existing.clone(),
                    _ => String::new(),
                };
                text.push('\n');
                session.answer_current(Answer::Code(text));
            }
            KeyCode::Backspace => {
                if let Answer::Code(existing) = &session.answers()[session.current_index()] {
                    let mut text = existing.clone();
                    text.pop();
                    if text.is_empty() {
                        session.answer_current(Answer::Unanswered);
                    } else {
                        session.answer_current(Answer::Code(text));
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_languages_action(&mut self, action: Action) {
        let count = curriculum::supported_languages().len();
        match action {
            Action::Down => {
                self.state.language_selected = (self.state.language_selected + 1).min(count - 1);
            }
            Action::Up => {
                self.state.language_selected = self.state.language_selected.saturating_sub(1);
            }
            Action::Select => {
                let language = curriculum::supported_languages()[self.state.language_selected];
                self.state.graph = curriculum::graph_for(language);
                self.state.dashboard_selected = 0;
                self.state.screen = Screen::Dashboard;
                self.state.status.clear();
                self.spawn_fetch_topics(language.to_string());
            }
            _ => {}
        }
    }

    fn handle_dashboard_action(&mut self, action: Action) {
        let Some(graph) = self.state.graph.clone() else {
            self.state.screen = Screen::Languages;
            return;
        };
        let language = graph.language.clone();

        match action {
            Action::Down => {
                self.state.dashboard_selected =
                    (self.state.dashboard_selected + 1).min(graph.len().saturating_sub(1));
            }
            Action::Up => {
                self.state.dashboard_selected = self.state.dashboard_selected.saturating_sub(1);
            }
            Action::Select => {
                let topic = &graph.topics[self.state.dashboard_selected];
                let progress = self.language_progress(&language);
                if !resolve_status(topic, &progress).is_accessible() {
                    self.state.status.set_error(format!(
                        "\"{}\" is locked; complete its prerequisites first",
                        topic.name
                    ));
                    return;
                }
                self.open_quiz_setup(&language, topic.name.clone());
            }
            Action::MarkTutorial => {
                let topic = graph.topics[self.state.dashboard_selected].name.clone();
                let progress = self.language_progress(&language);
                if !resolve_status(&graph.topics[self.state.dashboard_selected], &progress)
                    .is_accessible()
                {
                    self.state.status.set_error("Topic is locked");
                    return;
                }
                self.mark_tutorial_complete(&language, &topic);
            }
            Action::OpenCustomQuiz => {
                let progress = self.language_progress(&language);
                if !QuizComposer::feature_available(&progress) {
                    self.state.status.set_error(format!(
                        "Complete at least 4 topics in {} to unlock custom quizzes ({} done)",
                        language,
                        progress.completed_count()
                    ));
                    return;
                }
                self.state.composer = Some(QuizComposer::new(&graph, &progress));
                self.state.composer_selected = 0;
                self.state.screen = Screen::Composer;
                self.state.status.clear();
            }
            Action::Refresh => {
                self.spawn_fetch_topics(language);
                self.state.status.set_message("Refreshing topics...");
            }
            Action::Back => {
                self.state.screen = Screen::Languages;
                self.state.graph = None;
                self.state.status.clear();
            }
            _ => {}
        }
    }

    fn handle_composer_action(&mut self, action: Action) {
        let Some(composer) = self.state.composer.as_mut() else {
            self.state.screen = Screen::Dashboard;
            return;
        };
        let topic_count = composer.selectable_topics().len();

        match action {
            Action::Down => {
                self.state.composer_selected =
                    (self.state.composer_selected + 1).min(topic_count.saturating_sub(1));
            }
            Action::Up => {
                self.state.composer_selected = self.state.composer_selected.saturating_sub(1);
            }
            Action::Select => {
                if let Some(topic) =
                    composer.selectable_topics().get(self.state.composer_selected).cloned()
                {
                    composer.toggle(&topic);
                }
            }
            Action::Submit => match composer.build_config() {
                Ok(config) => self.start_custom_quiz(config),
                Err(e) => self.state.status.set_error(e.to_string()),
            },
            Action::Back => {
                self.state.composer = None;
                self.state.screen = Screen::Dashboard;
                self.state.status.clear();
            }
            _ => {}
        }
    }

    fn handle_quiz_action(&mut self, action: Action) {
        let Some(session) = self.state.session.as_mut() else {
            self.state.screen = Screen::Dashboard;
            return;
        };

        match session.phase() {
            QuizPhase::Setup => self.handle_setup_action(action),
            QuizPhase::Generating => {
                // Only abandonment is meaningful while the request is out
                if action == Action::Back {
                    self.abandon_session();
                }
            }
            QuizPhase::Active => self.handle_active_action(action),
            QuizPhase::Completed => {
                if action == Action::Back {
                    self.abandon_session();
                }
            }
            QuizPhase::Results => self.handle_results_action(action),
        }
    }

    fn handle_setup_action(&mut self, action: Action) {
        let Some(session) = self.state.session.as_mut() else { return };
        let config = session.config().clone();

        match action {
            Action::Up => {
                self.reconfigure_session(config.difficulty.harder(), config.num_questions);
            }
            Action::Down => {
                self.reconfigure_session(config.difficulty.easier(), config.num_questions);
            }
            Action::Left | Action::Right => {
                let counts = ALLOWED_QUESTION_COUNTS;
                let idx = counts.iter().position(|&c| c == config.num_questions).unwrap_or(1);
                let idx = if action == Action::Right {
                    (idx + 1).min(counts.len() - 1)
                } else {
                    idx.saturating_sub(1)
                };
                self.reconfigure_session(config.difficulty, counts[idx]);
            }
            Action::Select => {
                match session.begin_generation() {
                    Ok(config) => {
                        let config = config.clone();
                        let epoch = self.state.session_epoch;
                        self.state.status.clear();
                        self.spawn_generate(config, epoch);
                    }
                    Err(e) => self.state.status.set_error(e.to_string()),
                }
            }
            Action::Back => self.abandon_session(),
            _ => {}
        }
    }

    fn handle_active_action(&mut self, action: Action) {
        let Some(session) = self.state.session.as_mut() else { return };

        match action {
            Action::Down | Action::Up => {
                // Move the MCQ selection; recorded immediately, radio-style
                if let Some(Question::Mcq { options, .. }) = session.current_question() {
                    let current = &session.answers()[session.current_index()];
                    if let Some(next) = next_choice(current, action, options.len()) {
                        session.answer_current(Answer::Choice(next));
                    }
                }
            }
            Action::Right => session.next(),
            Action::Left => session.previous(),
            Action::JumpTo(index) => session.jump_to(index),
            Action::InsertMode => {
                if !matches!(session.current_question(), Some(Question::Mcq { .. })) {
                    self.state.insert_mode = true;
                }
            }
            Action::Submit => self.submit_session(),
            Action::Back => self.abandon_session(),
            _ => {}
        }
    }

    fn handle_results_action(&mut self, action: Action) {
        match action {
            Action::Down => self.state.results_scroll = self.state.results_scroll.saturating_add(1),
            Action::Up => self.state.results_scroll = self.state.results_scroll.saturating_sub(1),
            Action::Refresh => {
                // Retake: an entirely new session with the same config and
                // a fresh epoch; prior answers are not reused.
                if let Some(session) = self.state.session.take() {
                    let config = session.config().clone();
                    self.state.drop_session();
                    self.state.session = Some(QuizSession::new(config));
                    self.state.status.clear();
                }
            }
            Action::Back | Action::Select => {
                let language = self.state.language().map(String::from);
                self.abandon_session();
                // Unlock states may have changed; refresh from the service
                if let Some(language) = language {
                    self.spawn_fetch_topics(language);
                }
            }
            _ => {}
        }
    }

    // ---- session lifecycle -------------------------------------------

    /// Open quiz setup for a single topic
    fn open_quiz_setup(&mut self, language: &str, topic: String) {
        let config = QuizConfig::new(
            language,
            QuizTarget::Topic(topic),
            self.config.default_difficulty,
            self.config.default_question_count,
        );
        match config {
            Ok(config) => {
                self.state.drop_session();
                self.state.session = Some(QuizSession::new(config));
                self.state.screen = Screen::Quiz;
                self.state.status.clear();
            }
            Err(e) => self.state.status.set_error(e.to_string()),
        }
    }

    /// Start a custom quiz directly in the generating phase
    fn start_custom_quiz(&mut self, config: QuizConfig) {
        self.state.drop_session();
        let mut session = QuizSession::new(config);
        let epoch = self.state.session_epoch;

        match session.begin_generation() {
            Ok(config) => {
                let config = config.clone();
                self.state.session = Some(session);
                self.state.composer = None;
                self.state.screen = Screen::Quiz;
                self.state.status.clear();
                self.spawn_generate(config, epoch);
            }
            Err(e) => self.state.status.set_error(e.to_string()),
        }
    }

    /// Rebuild the session config during setup
    fn reconfigure_session(&mut self, difficulty: Difficulty, num_questions: usize) {
        let Some(session) = self.state.session.as_mut() else { return };
        let current = session.config().clone();
        match QuizConfig::new(current.language, current.target, difficulty, num_questions) {
            Ok(config) => session.reconfigure(config),
            Err(e) => self.state.status.set_error(e.to_string()),
        }
    }

    /// Manual submit from the active phase
    fn submit_session(&mut self) {
        let Some(session) = self.state.session.as_mut() else { return };
        match session.submit() {
            Ok(payload) => {
                self.stop_timer();
                self.state.insert_mode = false;
                let epoch = self.state.session_epoch;
                self.spawn_submit(payload, epoch);
            }
            Err(e) => self.state.status.set_error(e.to_string()),
        }
    }

    /// Discard the session: cancel the countdown, invalidate the epoch so
    /// in-flight results are ignored, and return to the dashboard. No
    /// rollback request is sent.
    fn abandon_session(&mut self) {
        self.stop_timer();
        self.state.drop_session();
        self.state.screen = Screen::Dashboard;
        self.state.status.clear();
    }

    /// Cancel the countdown task, if one is running
    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    /// Mark a tutorial complete: local cache first, service ack in the
    /// background. Completion is shown regardless of whether the ack
    /// succeeds; progression feedback outranks persistence confirmation.
    fn mark_tutorial_complete(&mut self, language: &str, topic: &str) {
        self.state.progress.language_mut(language).record_tutorial_completion(topic);
        if let Err(e) = self.state.progress.save() {
            tracing::warn!("Failed to persist progress cache: {}", e);
        }
        self.state.status.set_message(format!("Tutorial \"{}\" marked complete", topic));
        self.spawn_complete_tutorial(language.to_string(), topic.to_string());
    }

    // ---- timer and engine events -------------------------------------

    /// Handle one countdown tick, dropping stale epochs
    fn handle_tick(&mut self, tick: TimerTick) {
        if tick.epoch != self.state.session_epoch {
            return;
        }
        let Some(session) = self.state.session.as_mut() else { return };

        match session.tick() {
            Tick::Expired(payload) => {
                // Time exhausted: the designed path, not an error
                self.stop_timer();
                self.state.insert_mode = false;
                let epoch = self.state.session_epoch;
                self.spawn_submit(payload, epoch);
            }
            Tick::Counting(_) | Tick::Ignored => {}
        }
    }

    /// Handle the outcome of a spawned network task
    fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Generated { epoch, outcome } => {
                if epoch != self.state.session_epoch {
                    return;
                }
                let Some(session) = self.state.session.as_mut() else { return };
                match outcome {
                    Ok(quiz) => {
                        session.generation_succeeded(quiz);
                        if session.phase() == QuizPhase::Active {
                            self.stop_timer();
                            self.timer = Some(QuizTimer::start(epoch, self.ticks_tx.clone()));
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Quiz generation failed: {}", e);
                        let message = if e.is_recoverable() {
                            format!("{} (press Enter to retry)", e)
                        } else {
                            e.to_string()
                        };
                        session.generation_failed(message);
                    }
                }
            }
            EngineEvent::Graded { epoch, outcome } => {
                if epoch != self.state.session_epoch {
                    return;
                }
                match outcome {
                    Ok(result) => self.apply_grading(result),
                    Err(e) => {
                        tracing::warn!("Quiz submission failed: {}", e);
                        if let Some(session) = self.state.session.as_mut() {
                            session.submission_failed(e.to_string());
                        }
                    }
                }
            }
            EngineEvent::TopicsLoaded { language, outcome } => match outcome {
                Ok(response) => {
                    self.merge_topics(&language, &response);
                    self.state.status.clear();
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch topics for {}: {}", language, e);
                    self.state.status.set_error("Service unreachable; showing cached progress");
                }
            },
            EngineEvent::ProgressLoaded(outcome) => match outcome {
                Ok(snapshot) => self.merge_user_progress(snapshot),
                Err(e) => {
                    tracing::warn!("Failed to fetch user progress: {}", e);
                }
            },
            EngineEvent::ProgressAck(outcome) => {
                // Non-fatal by design; the UI has already moved on
                if let Err(e) = outcome {
                    tracing::warn!("Progress update not acknowledged: {}", e);
                }
            }
        }
    }

    /// Apply a grading result: issue the progress update before the
    /// results transition is displayed, then let the session advance.
    fn apply_grading(&mut self, result: QuizResult) {
        let Some(session) = self.state.session.as_mut() else { return };
        let language = session.config().language.clone();
        let topic = session.config().target.single_topic().map(String::from);

        if let Some(topic) = &topic {
            self.spawn_complete_quiz(language.clone(), topic.clone(), result.percentage);
            self.state
                .progress
                .language_mut(&language)
                .record_quiz(topic, result.percentage, result.passed);
            if let Err(e) = self.state.progress.save() {
                tracing::warn!("Failed to persist progress cache: {}", e);
            }
        }

        if let Some(session) = self.state.session.as_mut() {
            session.grading_received(result);
        }
        self.state.results_scroll = 0;
    }

    // ---- local progress cache ----------------------------------------

    /// Snapshot of the cached progress for a language
    fn language_progress(&self, language: &str) -> LanguageProgress {
        self.state.progress.language(language).cloned().unwrap_or_default()
    }

    /// Merge a topics-with-progress response into the cache. Attempts and
    /// best scores only ever rise; completion is never revoked.
    fn merge_topics(&mut self, language: &str, response: &TopicsResponse) {
        let progress = self.state.progress.language_mut(language);
        for remote in &response.topics {
            let local = progress.topic_mut(&remote.topic);
            local.completed |= remote.completed;
            local.tutorial_completed |= remote.tutorial_completed;
            local.quiz_attempts = local.quiz_attempts.max(remote.quiz_attempts);
            local.best_quiz_score = local.best_quiz_score.max(remote.best_quiz_score);
        }
        if let Err(e) = self.state.progress.save() {
            tracing::warn!("Failed to persist progress cache: {}", e);
        }
    }

    /// Merge the cross-language snapshot into the cache
    fn merge_user_progress(&mut self, snapshot: UserProgress) {
        for (language, summary) in snapshot {
            let progress = self.state.progress.language_mut(&language);
            for topic in summary.completed_topics {
                progress.topic_mut(&topic).completed = true;
            }
            for (topic, score) in summary.quiz_scores {
                let local = progress.topic_mut(&topic);
                local.best_quiz_score = local.best_quiz_score.max(score);
                local.quiz_attempts = local.quiz_attempts.max(1);
            }
        }
        if let Err(e) = self.state.progress.save() {
            tracing::warn!("Failed to persist progress cache: {}", e);
        }
    }

    // ---- spawned network tasks ---------------------------------------

    fn spawn_generate(&self, config: QuizConfig, epoch: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = client.generate_quiz(&config).await;
            let _ = tx.send(EngineEvent::Generated { epoch, outcome }).await;
        });
    }

    fn spawn_submit(&self, payload: crate::quiz::SubmissionPayload, epoch: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = client.submit_quiz(&payload).await;
            let _ = tx.send(EngineEvent::Graded { epoch, outcome }).await;
        });
    }

    fn spawn_fetch_topics(&self, language: String) {
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = client.topics_with_progress(&language).await;
            let _ = tx.send(EngineEvent::TopicsLoaded { language, outcome }).await;
        });
    }

    fn spawn_fetch_progress(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = client.user_progress().await;
            let _ = tx.send(EngineEvent::ProgressLoaded(outcome)).await;
        });
    }

    fn spawn_complete_tutorial(&self, language: String, topic: String) {
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = client.complete_tutorial(&language, &topic).await;
            let _ = tx.send(EngineEvent::ProgressAck(outcome)).await;
        });
    }

    fn spawn_complete_quiz(&self, language: String, topic: String, score: u8) {
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = client.complete_quiz(&language, &topic, score).await;
            let _ = tx.send(EngineEvent::ProgressAck(outcome)).await;
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop_timer();
        let _ = self.restore_terminal();
    }
}

/// Next MCQ selection for an up/down move, clamped to the option range.
/// `None` when the question has no options to select.
fn next_choice(current: &Answer, action: Action, option_count: usize) -> Option<usize> {
    if option_count == 0 {
        return None;
    }
    Some(match (current, action) {
        (Answer::Choice(i), Action::Down) => (*i + 1).min(option_count - 1),
        (Answer::Choice(i), Action::Up) => i.saturating_sub(1),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mcq_selection_clamps_to_option_range() {
        assert_eq!(next_choice(&Answer::Unanswered, Action::Down, 4), Some(0));
        assert_eq!(next_choice(&Answer::Choice(0), Action::Down, 4), Some(1));
        assert_eq!(next_choice(&Answer::Choice(3), Action::Down, 4), Some(3));
        assert_eq!(next_choice(&Answer::Choice(0), Action::Up, 4), Some(0));
        assert_eq!(next_choice(&Answer::Code("x".into()), Action::Up, 4), Some(0));
    }

    #[test]
    fn mcq_selection_with_no_options_is_inert() {
        assert_eq!(next_choice(&Answer::Unanswered, Action::Down, 0), None);
        assert_eq!(next_choice(&Answer::Choice(1), Action::Up, 0), None);
    }
}
