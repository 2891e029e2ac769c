//! Unlock resolution
//!
//! Pure functions that turn a topic graph plus a user's progress into the
//! accessibility state shown on the dashboard. Completion always wins:
//! a completed topic stays completed regardless of its prerequisites.

use super::{Topic, TopicGraph};
use crate::progress::LanguageProgress;

/// Resolved accessibility state of a topic for a given user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStatus {
    /// At least one prerequisite is not yet completed
    Locked,
    /// Unlocked, no interaction yet
    Available,
    /// Unlocked and the user has started (tutorial done or quiz attempted)
    InProgress,
    /// The user has completed this topic
    Completed,
}

impl TopicStatus {
    /// Whether the topic can be opened (tutorial or quiz)
    pub fn is_accessible(self) -> bool {
        self != TopicStatus::Locked
    }

    /// Short label for display
    pub fn label(self) -> &'static str {
        match self {
            TopicStatus::Locked => "Locked",
            TopicStatus::Available => "Available",
            TopicStatus::InProgress => "In Progress",
            TopicStatus::Completed => "Completed",
        }
    }
}

/// Resolve the status of a single topic.
///
/// Precedence: completed, then locked, then in-progress, then available.
pub fn resolve_status(topic: &Topic, progress: &LanguageProgress) -> TopicStatus {
    if progress.is_completed(&topic.name) {
        return TopicStatus::Completed;
    }

    let locked = topic.prerequisites.iter().any(|prereq| !progress.is_completed(prereq));
    if locked {
        return TopicStatus::Locked;
    }

    let started = progress.topic(&topic.name).is_some_and(|p| p.has_interaction());
    if started { TopicStatus::InProgress } else { TopicStatus::Available }
}

/// Overall completion percentage for a language, rounded to one decimal.
///
/// Standard rounding; an empty graph reports zero.
pub fn overall_percentage(graph: &TopicGraph, progress: &LanguageProgress) -> f64 {
    if graph.is_empty() {
        return 0.0;
    }
    let completed =
        graph.topics.iter().filter(|t| progress.is_completed(&t.name)).count();
    let raw = completed as f64 / graph.len() as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::graph_for;

    fn progress_with_completed(topics: &[&str]) -> LanguageProgress {
        let mut progress = LanguageProgress::default();
        for topic in topics {
            progress.topic_mut(topic).completed = true;
        }
        progress
    }

    #[test]
    fn first_topic_is_available_for_new_user() {
        let graph = graph_for("Python").unwrap();
        let progress = LanguageProgress::default();
        assert_eq!(resolve_status(&graph.topics[0], &progress), TopicStatus::Available);
    }

    #[test]
    fn topic_with_unmet_prerequisite_is_locked() {
        let graph = graph_for("Python").unwrap();
        let progress = LanguageProgress::default();
        assert_eq!(resolve_status(&graph.topics[1], &progress), TopicStatus::Locked);
    }

    #[test]
    fn topic_unlocks_once_prerequisite_completed() {
        let graph = graph_for("Python").unwrap();
        let progress = progress_with_completed(&["Variables and Data Types"]);
        assert_eq!(resolve_status(&graph.topics[1], &progress), TopicStatus::Available);
    }

    #[test]
    fn started_topic_is_in_progress() {
        let graph = graph_for("Python").unwrap();
        let mut progress = progress_with_completed(&["Variables and Data Types"]);
        progress.record_tutorial_completion("Control Structures");
        assert_eq!(resolve_status(&graph.topics[1], &progress), TopicStatus::InProgress);
    }

    #[test]
    fn quiz_attempt_counts_as_in_progress() {
        let graph = graph_for("Python").unwrap();
        let mut progress = LanguageProgress::default();
        progress.record_quiz("Variables and Data Types", 40, false);
        assert_eq!(resolve_status(&graph.topics[0], &progress), TopicStatus::InProgress);
    }

    #[test]
    fn completion_takes_precedence_over_lock() {
        let graph = graph_for("Python").unwrap();
        // Completed topic whose prerequisite is absent still reads completed
        let progress = progress_with_completed(&["Control Structures"]);
        assert_eq!(resolve_status(&graph.topics[1], &progress), TopicStatus::Completed);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let graph = graph_for("Python").unwrap();
        let progress = progress_with_completed(&["Variables and Data Types"]);
        // 1/6 = 16.666...% -> 16.7
        assert_eq!(overall_percentage(&graph, &progress), 16.7);
    }

    #[test]
    fn percentage_of_full_completion_is_hundred() {
        let graph = graph_for("Python").unwrap();
        let names: Vec<&str> = graph.topic_names().collect();
        let progress = progress_with_completed(&names);
        assert_eq!(overall_percentage(&graph, &progress), 100.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A topic with prerequisites is never accessible while any
            /// prerequisite is incomplete, unless the topic itself is done.
            #[test]
            fn prerequisites_gate_access(completed_mask in 0u8..64, topic_idx in 0usize..6) {
                let graph = graph_for("Python").unwrap();
                let mut progress = LanguageProgress::default();
                for (i, topic) in graph.topics.iter().enumerate() {
                    if completed_mask & (1 << i) != 0 {
                        progress.topic_mut(&topic.name).completed = true;
                    }
                }

                let topic = &graph.topics[topic_idx];
                let status = resolve_status(topic, &progress);
                let prereqs_met =
                    topic.prerequisites.iter().all(|p| progress.is_completed(p));

                if !prereqs_met && !progress.is_completed(&topic.name) {
                    prop_assert_eq!(status, TopicStatus::Locked);
                }
                if progress.is_completed(&topic.name) {
                    prop_assert_eq!(status, TopicStatus::Completed);
                }
            }
        }
    }
}
