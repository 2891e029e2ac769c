//! Custom quiz composer
//!
//! Builds a mixed-topic quiz from topics the user has already completed.
//! The composer owns selection and validation only; question composition
//! across the chosen topics is the tutor service's job.

use std::collections::BTreeSet;

use crate::curriculum::TopicGraph;
use crate::progress::LanguageProgress;

use super::ValidationError;
use super::config::{Difficulty, QuizConfig, QuizTarget};

/// Completed topics required before the custom quiz feature is offered.
/// Distinct from the per-quiz minimum of two selected topics.
pub const FEATURE_GATE_COMPLETED: usize = 4;

/// Minimum distinct topics per custom quiz
pub const MIN_SELECTED_TOPICS: usize = 2;

/// Question count for custom quizzes
pub const CUSTOM_QUIZ_QUESTIONS: usize = 10;

/// Selection state for composing a custom quiz
#[derive(Debug, Clone)]
pub struct QuizComposer {
    language: String,
    /// Topics the user may select, in curriculum order
    selectable: Vec<String>,
    /// Currently selected topics; set semantics, no duplicates
    selected: BTreeSet<String>,
}

impl QuizComposer {
    /// Build a composer for a language. Only completed topics are
    /// selectable.
    pub fn new(graph: &TopicGraph, progress: &LanguageProgress) -> Self {
        let selectable = graph
            .topics
            .iter()
            .filter(|t| progress.is_completed(&t.name))
            .map(|t| t.name.clone())
            .collect();

        Self { language: graph.language.clone(), selectable, selected: BTreeSet::new() }
    }

    /// Whether the custom quiz feature is offered for this progress state
    pub fn feature_available(progress: &LanguageProgress) -> bool {
        progress.completed_count() >= FEATURE_GATE_COMPLETED
    }

    /// Language this composer targets
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Topics the user may select, in curriculum order
    pub fn selectable_topics(&self) -> &[String] {
        &self.selectable
    }

    /// Currently selected topics
    pub fn selected_topics(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// How many topics are selected
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Whether a topic is currently selected
    pub fn is_selected(&self, topic: &str) -> bool {
        self.selected.contains(topic)
    }

    /// Toggle a topic's selection.
    ///
    /// Inert for topics that are not selectable (locked or incomplete);
    /// that is a no-op, not an error. Returns the topic's selection state
    /// after the call.
    pub fn toggle(&mut self, topic: &str) -> bool {
        if !self.selectable.iter().any(|t| t == topic) {
            return false;
        }

        if !self.selected.remove(topic) {
            self.selected.insert(topic.to_string());
        }
        self.is_selected(topic)
    }

    /// Validate the selection and build the quiz configuration.
    ///
    /// Rejected locally when fewer than two topics are selected; nothing
    /// reaches the service in that case and the selection stays editable.
    pub fn build_config(&self) -> Result<QuizConfig, ValidationError> {
        if self.selected.len() < MIN_SELECTED_TOPICS {
            return Err(ValidationError::TooFewTopics { selected: self.selected.len() });
        }

        QuizConfig::new(
            self.language.clone(),
            QuizTarget::Topics(self.selected.clone()),
            Difficulty::Medium,
            CUSTOM_QUIZ_QUESTIONS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::graph_for;
    use pretty_assertions::assert_eq;

    fn progress_with_completed(topics: &[&str]) -> LanguageProgress {
        let mut progress = LanguageProgress::default();
        for topic in topics {
            progress.topic_mut(topic).completed = true;
        }
        progress
    }

    fn composer(completed: &[&str]) -> QuizComposer {
        let graph = graph_for("Python").unwrap();
        QuizComposer::new(&graph, &progress_with_completed(completed))
    }

    #[test]
    fn only_completed_topics_are_selectable() {
        let composer = composer(&["Variables and Data Types", "Functions"]);
        assert_eq!(
            composer.selectable_topics(),
            &["Variables and Data Types".to_string(), "Functions".to_string()]
        );
    }

    #[test]
    fn toggling_incomplete_topic_is_inert() {
        let mut composer = composer(&["Variables and Data Types"]);
        assert!(!composer.toggle("Pointers"));
        assert_eq!(composer.selected_count(), 0);
    }

    #[test]
    fn toggle_selects_and_deselects() {
        let mut composer = composer(&["Variables and Data Types", "Functions"]);
        assert!(composer.toggle("Functions"));
        assert!(composer.is_selected("Functions"));
        assert!(!composer.toggle("Functions"));
        assert_eq!(composer.selected_count(), 0);
    }

    #[test]
    fn selection_has_set_semantics() {
        let mut composer = composer(&["Variables and Data Types", "Functions"]);
        composer.toggle("Functions");
        // Toggling again removes rather than duplicating
        composer.toggle("Functions");
        composer.toggle("Functions");
        assert_eq!(composer.selected_count(), 1);
    }

    #[test]
    fn single_topic_selection_is_rejected_locally() {
        let mut composer = composer(&["Variables and Data Types", "Functions"]);
        composer.toggle("Functions");

        let err = composer.build_config().unwrap_err();
        assert_eq!(err, ValidationError::TooFewTopics { selected: 1 });
        // Selection stays editable
        assert_eq!(composer.selected_count(), 1);
    }

    #[test]
    fn two_topics_build_a_medium_ten_question_config() {
        let mut composer = composer(&["Variables and Data Types", "Functions"]);
        composer.toggle("Variables and Data Types");
        composer.toggle("Functions");

        let config = composer.build_config().unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.num_questions, CUSTOM_QUIZ_QUESTIONS);
        match &config.target {
            QuizTarget::Topics(topics) => assert_eq!(topics.len(), 2),
            QuizTarget::Topic(_) => panic!("expected multi-topic target"),
        }
    }

    #[test]
    fn no_upper_bound_beyond_completed_topics() {
        let graph = graph_for("Python").unwrap();
        let names: Vec<&str> = graph.topic_names().collect();
        let mut composer = composer(&names);
        for name in &names {
            composer.toggle(name);
        }
        assert_eq!(composer.selected_count(), names.len());
        assert!(composer.build_config().is_ok());
    }

    #[test]
    fn feature_gate_requires_four_completed() {
        let three = progress_with_completed(&["A", "B", "C"]);
        let four = progress_with_completed(&["A", "B", "C", "D"]);
        assert!(!QuizComposer::feature_available(&three));
        assert!(QuizComposer::feature_available(&four));
    }
}
