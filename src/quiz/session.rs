//! Quiz session state machine
//!
//! One session covers one quiz attempt:
//!
//! ```text
//! setup -> generating -> active -> completed -> results
//!            |               ^          |
//!            v               +----------+  (submission failure,
//!          setup (generation failure)       answers intact)
//! ```
//!
//! The machine is pure state: network calls happen elsewhere and their
//! outcomes are fed back in through `generation_succeeded`,
//! `generation_failed`, `grading_received`, and `submission_failed`. That
//! keeps answer/question alignment entirely under the session's control and
//! makes every transition testable without a service.

use crate::service::models::{Answer, GeneratedQuiz, Question, QuizResult, SubmitQuizRequest};

use super::ValidationError;
use super::config::QuizConfig;

/// Phase of a quiz attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuizPhase {
    /// Choosing difficulty and question count
    #[default]
    Setup,
    /// Generation request in flight
    Generating,
    /// Answering questions against the countdown
    Active,
    /// Submitted; grading request in flight, answers frozen
    Completed,
    /// Graded; terminal for this session
    Results,
}

/// Everything needed to submit (or retry submitting) a quiz
pub type SubmissionPayload = SubmitQuizRequest;

/// Outcome of one countdown tick
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Still counting; seconds now remaining
    Counting(u32),
    /// Time ran out: the session has moved to `Completed` and the caller
    /// must submit this payload. Fires at most once per session.
    Expired(SubmissionPayload),
    /// The session is not active; a stale callback lands here harmlessly
    Ignored,
}

/// State for a single quiz attempt, owned by the view that created it
#[derive(Debug, Clone)]
pub struct QuizSession {
    config: QuizConfig,
    phase: QuizPhase,
    quiz_id: Option<String>,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    current_index: usize,
    seconds_remaining: u32,
    result: Option<QuizResult>,
    error: Option<String>,
}

impl QuizSession {
    /// Start a new session in `Setup` for an already-validated config
    pub fn new(config: QuizConfig) -> Self {
        Self {
            config,
            phase: QuizPhase::Setup,
            quiz_id: None,
            questions: Vec::new(),
            answers: Vec::new(),
            current_index: 0,
            seconds_remaining: 0,
            result: None,
            error: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// The configuration this session was started with
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Quiz id, once generation has succeeded
    pub fn quiz_id(&self) -> Option<&str> {
        self.quiz_id.as_deref()
    }

    /// Questions in generation order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Answers aligned by index with `questions`
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Index of the visible question
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The visible question, if any
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Seconds left on the countdown
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// The graded result, once in `Results`
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// Last surfaced error message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// How many questions have an answer entered
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_answered()).count()
    }

    /// Replace the configuration while still in `Setup`
    pub fn reconfigure(&mut self, config: QuizConfig) {
        if self.phase == QuizPhase::Setup {
            self.config = config;
        }
    }

    /// Move to `Generating`.
    ///
    /// Blocked while a request is already in flight, so the start action
    /// cannot double-submit. Returns the config to send.
    pub fn begin_generation(&mut self) -> Result<&QuizConfig, ValidationError> {
        match self.phase {
            QuizPhase::Setup => {
                self.phase = QuizPhase::Generating;
                self.error = None;
                Ok(&self.config)
            }
            QuizPhase::Generating => Err(ValidationError::RequestInFlight),
            _ => Err(ValidationError::WrongPhase),
        }
    }

    /// Generation came back: seed answers with the unanswered sentinel,
    /// arm the countdown, and enter `Active`.
    ///
    /// A response with no questions is off-contract; it takes the failure
    /// path back to `Setup` instead of entering an unanswerable quiz.
    pub fn generation_succeeded(&mut self, quiz: GeneratedQuiz) {
        if self.phase != QuizPhase::Generating {
            return;
        }

        if quiz.questions.is_empty() {
            self.generation_failed("service returned a quiz with no questions");
            return;
        }

        self.answers = vec![Answer::Unanswered; quiz.questions.len()];
        self.seconds_remaining = quiz.time_limit_minutes * 60;
        self.quiz_id = Some(quiz.quiz_id);
        self.questions = quiz.questions;
        self.current_index = 0;
        self.phase = QuizPhase::Active;
        self.error = None;
    }

    /// Generation failed: surface the error and return to `Setup` with no
    /// partial session retained.
    pub fn generation_failed(&mut self, message: impl Into<String>) {
        if self.phase != QuizPhase::Generating {
            return;
        }

        self.quiz_id = None;
        self.questions.clear();
        self.answers.clear();
        self.seconds_remaining = 0;
        self.error = Some(message.into());
        self.phase = QuizPhase::Setup;
    }

    /// Record an answer for the visible question
    pub fn answer_current(&mut self, answer: Answer) {
        if self.phase == QuizPhase::Active {
            self.answers[self.current_index] = answer;
        }
    }

    /// Move to the next question; never past the end, never touching answers
    pub fn next(&mut self) {
        if self.phase == QuizPhase::Active
            && self.current_index + 1 < self.questions.len()
        {
            self.current_index += 1;
        }
    }

    /// Move to the previous question
    pub fn previous(&mut self) {
        if self.phase == QuizPhase::Active && self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Jump to a question by index, clamped to the valid range
    pub fn jump_to(&mut self, index: usize) {
        if self.phase == QuizPhase::Active && !self.questions.is_empty() {
            self.current_index = index.min(self.questions.len() - 1);
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Reaching zero performs the submit transition itself, so exhaustion
    /// triggers exactly one automatic submission; the phase guard makes any
    /// further tick a no-op.
    pub fn tick(&mut self) -> Tick {
        if self.phase != QuizPhase::Active {
            return Tick::Ignored;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            match self.submit() {
                Ok(payload) => Tick::Expired(payload),
                Err(_) => Tick::Ignored,
            }
        } else {
            Tick::Counting(self.seconds_remaining)
        }
    }

    /// Submit the attempt with whatever answers are present.
    ///
    /// Allowed at any question index; unanswered slots keep their sentinel.
    /// Moves to `Completed`, freezing answers while grading is in flight.
    pub fn submit(&mut self) -> Result<SubmissionPayload, ValidationError> {
        if self.phase != QuizPhase::Active {
            return Err(ValidationError::WrongPhase);
        }

        let quiz_id = self.quiz_id.clone().ok_or(ValidationError::WrongPhase)?;
        self.phase = QuizPhase::Completed;

        Ok(SubmitQuizRequest {
            quiz_id,
            answers: self.answers.clone(),
            language: self.config.language.clone(),
            topic: self.config.target.single_topic().map(String::from),
            difficulty: self.config.difficulty.to_string(),
        })
    }

    /// Grading failed: back to `Active` with all answers intact so the
    /// user can retry submission without redoing the quiz.
    pub fn submission_failed(&mut self, message: impl Into<String>) {
        if self.phase != QuizPhase::Completed {
            return;
        }

        self.error = Some(message.into());
        self.phase = QuizPhase::Active;
    }

    /// Grading came back: hold the result and enter `Results`.
    ///
    /// The result's `passed` field is authoritative; nothing here
    /// recomputes pass/fail.
    pub fn grading_received(&mut self, result: QuizResult) {
        if self.phase != QuizPhase::Completed {
            return;
        }

        self.result = Some(result);
        self.phase = QuizPhase::Results;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::config::{Difficulty, QuizTarget};
    use pretty_assertions::assert_eq;

    fn config() -> QuizConfig {
        QuizConfig::new(
            "Python",
            QuizTarget::Topic("Functions".into()),
            Difficulty::Easy,
            5,
        )
        .unwrap()
    }

    fn mcq(text: &str) -> Question {
        Question::Mcq {
            question: text.into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct: 0,
            explanation: None,
        }
    }

    fn generated(quiz_id: &str, questions: usize, minutes: u32) -> GeneratedQuiz {
        GeneratedQuiz {
            quiz_id: quiz_id.into(),
            language: "Python".into(),
            topic: Some("Functions".into()),
            topics: None,
            difficulty: "Easy".into(),
            questions: (0..questions).map(|i| mcq(&format!("Q{}", i))).collect(),
            time_limit_minutes: minutes,
        }
    }

    fn active_session(questions: usize, minutes: u32) -> QuizSession {
        let mut session = QuizSession::new(config());
        session.begin_generation().unwrap();
        session.generation_succeeded(generated("quiz-1", questions, minutes));
        session
    }

    fn result(percentage: u8, passed: bool) -> QuizResult {
        QuizResult {
            score: 3,
            total_questions: 5,
            percentage,
            passed,
            detailed_results: Vec::new(),
        }
    }

    #[test]
    fn starts_in_setup() {
        let session = QuizSession::new(config());
        assert_eq!(session.phase(), QuizPhase::Setup);
        assert!(session.quiz_id().is_none());
    }

    #[test]
    fn begin_generation_blocks_double_start() {
        let mut session = QuizSession::new(config());
        session.begin_generation().unwrap();
        assert_eq!(session.begin_generation(), Err(ValidationError::RequestInFlight));
    }

    #[test]
    fn generation_success_seeds_sentinels_and_countdown() {
        let session = active_session(5, 10);

        assert_eq!(session.phase(), QuizPhase::Active);
        assert_eq!(session.answers().len(), session.questions().len());
        assert!(session.answers().iter().all(|a| *a == Answer::Unanswered));
        assert_eq!(session.seconds_remaining(), 600);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn empty_question_set_is_rejected_as_generation_failure() {
        let mut session = QuizSession::new(config());
        session.begin_generation().unwrap();
        session.generation_succeeded(generated("quiz-1", 0, 10));

        assert_eq!(session.phase(), QuizPhase::Setup);
        assert!(session.quiz_id().is_none());
        assert!(session.error().is_some());

        // No answer slot exists to record into
        session.answer_current(Answer::Code("x".into()));
        assert!(session.answers().is_empty());

        // Retry can still succeed with a well-formed quiz
        session.begin_generation().unwrap();
        session.generation_succeeded(generated("quiz-2", 3, 10));
        assert_eq!(session.phase(), QuizPhase::Active);
    }

    #[test]
    fn generation_failure_returns_to_setup_with_nothing_retained() {
        let mut session = QuizSession::new(config());
        session.begin_generation().unwrap();
        session.generation_failed("service unavailable");

        assert_eq!(session.phase(), QuizPhase::Setup);
        assert!(session.quiz_id().is_none());
        assert!(session.questions().is_empty());
        assert_eq!(session.error(), Some("service unavailable"));

        // Retry with the same config succeeds and takes the fresh id
        session.begin_generation().unwrap();
        session.generation_succeeded(generated("quiz-2", 5, 10));
        assert_eq!(session.quiz_id(), Some("quiz-2"));
        assert!(session.error().is_none());
    }

    #[test]
    fn navigation_is_clamped_and_preserves_answers() {
        let mut session = active_session(3, 10);
        session.answer_current(Answer::Choice(2));

        session.previous();
        assert_eq!(session.current_index(), 0);

        session.next();
        session.next();
        session.next();
        assert_eq!(session.current_index(), 2);

        session.jump_to(99);
        assert_eq!(session.current_index(), 2);

        session.jump_to(0);
        assert_eq!(session.answers()[0], Answer::Choice(2));
    }

    #[test]
    fn manual_submit_allowed_with_unanswered_questions() {
        let mut session = active_session(5, 10);
        for i in 0..4 {
            session.jump_to(i);
            session.answer_current(Answer::Choice(1));
        }

        let payload = session.submit().unwrap();
        assert_eq!(payload.answers.len(), 5);
        assert_eq!(payload.answers[4], Answer::Unanswered);
        assert_eq!(session.phase(), QuizPhase::Completed);
    }

    #[test]
    fn manual_submit_allowed_from_any_index() {
        let mut session = active_session(5, 10);
        assert_eq!(session.current_index(), 0);
        assert!(session.submit().is_ok());
    }

    #[test]
    fn answers_frozen_while_grading() {
        let mut session = active_session(3, 10);
        session.submit().unwrap();

        session.answer_current(Answer::Choice(1));
        session.next();
        assert_eq!(session.answers()[0], Answer::Unanswered);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn timer_expiry_submits_exactly_once() {
        let mut session = active_session(5, 1);
        session.answer_current(Answer::Choice(0));

        let mut expirations = 0;
        for _ in 0..60 {
            if let Tick::Expired(payload) = session.tick() {
                expirations += 1;
                assert_eq!(payload.answers[0], Answer::Choice(0));
            }
        }
        assert_eq!(expirations, 1);
        assert_eq!(session.phase(), QuizPhase::Completed);

        // Stray late ticks are no-ops
        assert_eq!(session.tick(), Tick::Ignored);
    }

    #[test]
    fn tick_counts_down_while_active() {
        let mut session = active_session(3, 1);
        assert_eq!(session.tick(), Tick::Counting(59));
        assert_eq!(session.seconds_remaining(), 59);
    }

    #[test]
    fn tick_outside_active_is_ignored() {
        let mut session = QuizSession::new(config());
        assert_eq!(session.tick(), Tick::Ignored);
        session.begin_generation().unwrap();
        assert_eq!(session.tick(), Tick::Ignored);
    }

    #[test]
    fn submission_failure_returns_to_active_with_answers_intact() {
        let mut session = active_session(3, 10);
        session.answer_current(Answer::Choice(2));
        let first = session.submit().unwrap();

        session.submission_failed("network down");
        assert_eq!(session.phase(), QuizPhase::Active);
        assert_eq!(session.answers()[0], Answer::Choice(2));
        assert_eq!(session.error(), Some("network down"));

        // Retrying yields an identical payload: same quiz id, same answers
        let second = session.submit().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn grading_result_is_authoritative() {
        let mut session = active_session(3, 10);
        session.submit().unwrap();
        session.grading_received(result(60, true));

        assert_eq!(session.phase(), QuizPhase::Results);
        let graded = session.result().unwrap();
        assert_eq!(graded.percentage, 60);
        assert!(graded.passed);
    }

    #[test]
    fn failing_result_holds_failed_flag() {
        let mut session = active_session(3, 10);
        session.submit().unwrap();
        session.grading_received(result(59, false));
        assert!(!session.result().unwrap().passed);
    }

    #[test]
    fn stale_outcomes_in_wrong_phase_are_dropped() {
        let mut session = QuizSession::new(config());
        // Outcomes arriving without a matching in-flight request do nothing
        session.generation_succeeded(generated("ghost", 3, 10));
        assert_eq!(session.phase(), QuizPhase::Setup);
        session.grading_received(result(100, true));
        assert!(session.result().is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Answers and questions stay aligned from generation success
            /// through submission, whatever the user does in between.
            #[test]
            fn answers_length_matches_questions(
                question_count in 1usize..=10,
                actions in proptest::collection::vec(0u8..5, 0..40),
            ) {
                let mut session = active_session(question_count, 10);

                for action in actions {
                    match action {
                        0 => session.next(),
                        1 => session.previous(),
                        2 => session.answer_current(Answer::Choice(1)),
                        3 => session.jump_to(question_count / 2),
                        _ => { let _ = session.tick(); }
                    }
                    prop_assert_eq!(session.answers().len(), session.questions().len());
                    prop_assert!(session.current_index() < question_count);
                }

                if session.phase() == QuizPhase::Active {
                    let payload = session.submit().unwrap();
                    prop_assert_eq!(payload.answers.len(), question_count);
                }
            }
        }
    }
}
