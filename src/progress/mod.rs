//! Local progress store
//!
//! Caches per-language, per-topic progress for rendering and persists it as
//! JSON under the platform data directory. The tutor service remains the
//! source of truth; this cache is refreshed from service responses and
//! updated optimistically when the user completes tutorials or quizzes.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Progress for a single topic
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicProgress {
    /// Has the user completed this topic?
    pub completed: bool,

    /// Has the user finished the tutorial?
    pub tutorial_completed: bool,

    /// Number of quiz attempts, never decreases
    pub quiz_attempts: u32,

    /// Best quiz percentage ever achieved (0-100), never decreases
    pub best_quiz_score: u8,

    /// Timestamp of last interaction
    pub last_accessed: Option<i64>,
}

impl TopicProgress {
    /// Whether the user has interacted with this topic at all
    pub fn has_interaction(&self) -> bool {
        self.tutorial_completed || self.quiz_attempts > 0
    }
}

/// Progress for all topics in one language
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageProgress {
    /// Progress per topic name
    pub topics: HashMap<String, TopicProgress>,
}

impl LanguageProgress {
    /// Get progress for a topic (if any interaction has been recorded)
    pub fn topic(&self, name: &str) -> Option<&TopicProgress> {
        self.topics.get(name)
    }

    /// Get or lazily create progress for a topic
    pub fn topic_mut(&mut self, name: &str) -> &mut TopicProgress {
        self.topics.entry(name.to_string()).or_default()
    }

    /// Names of all completed topics
    pub fn completed_topics(&self) -> BTreeSet<&str> {
        self.topics
            .iter()
            .filter(|(_, p)| p.completed)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of completed topics
    pub fn completed_count(&self) -> usize {
        self.topics.values().filter(|p| p.completed).count()
    }

    /// Whether a topic is completed
    pub fn is_completed(&self, name: &str) -> bool {
        self.topics.get(name).is_some_and(|p| p.completed)
    }

    /// Mark a topic's tutorial as completed
    pub fn record_tutorial_completion(&mut self, topic: &str) {
        self.topic_mut(topic).tutorial_completed = true;
    }

    /// Record a quiz attempt for a topic.
    ///
    /// Attempts only increment and the best score only ever rises. The
    /// `passed` flag comes from the grading service and is what marks the
    /// topic completed; completion is never revoked by a later failure.
    pub fn record_quiz(&mut self, topic: &str, percentage: u8, passed: bool) {
        let progress = self.topic_mut(topic);
        progress.quiz_attempts += 1;
        progress.best_quiz_score = progress.best_quiz_score.max(percentage);
        if passed {
            progress.completed = true;
        }
    }
}

/// All progress data, keyed by language
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Progress per language
    pub languages: HashMap<String, LanguageProgress>,
}

impl Progress {
    /// Load progress from disk
    pub fn load() -> Result<Self> {
        Self::load_from(Self::progress_path()?)
    }

    /// Load progress from an explicit path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read progress from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse progress.json")
        } else {
            Ok(Self::default())
        }
    }

    /// Save progress to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::progress_path()?)
    }

    /// Save progress to an explicit path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize progress")?;

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write progress to {:?}", path))?;

        Ok(())
    }

    /// Get progress path
    fn progress_path() -> Result<PathBuf> {
        Ok(Config::data_dir()?.join("progress.json"))
    }

    /// Get progress for a language (if any)
    pub fn language(&self, language: &str) -> Option<&LanguageProgress> {
        self.languages.get(language)
    }

    /// Get or lazily create progress for a language
    pub fn language_mut(&mut self, language: &str) -> &mut LanguageProgress {
        self.languages.entry(language.to_string()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_progress_is_empty() {
        let progress = Progress::default();
        assert!(progress.languages.is_empty());
    }

    #[test]
    fn language_mut_creates_entry_if_missing() {
        let mut progress = Progress::default();
        progress.language_mut("Python").record_tutorial_completion("Functions");
        assert!(progress.languages.contains_key("Python"));
        assert!(progress.language("Python").unwrap().topic("Functions").unwrap().tutorial_completed);
    }

    #[test]
    fn record_quiz_increments_attempts() {
        let mut lang = LanguageProgress::default();
        lang.record_quiz("Functions", 40, false);
        lang.record_quiz("Functions", 80, true);

        let topic = lang.topic("Functions").unwrap();
        assert_eq!(topic.quiz_attempts, 2);
        assert_eq!(topic.best_quiz_score, 80);
        assert!(topic.completed);
    }

    #[test]
    fn best_score_never_decreases() {
        let mut lang = LanguageProgress::default();
        lang.record_quiz("Pointers", 90, true);
        lang.record_quiz("Pointers", 30, false);

        let topic = lang.topic("Pointers").unwrap();
        assert_eq!(topic.best_quiz_score, 90);
        // A later failing attempt does not revoke completion
        assert!(topic.completed);
    }

    #[test]
    fn completed_topics_lists_only_completed() {
        let mut lang = LanguageProgress::default();
        lang.record_quiz("A", 100, true);
        lang.record_quiz("B", 20, false);
        lang.record_tutorial_completion("C");

        let completed = lang.completed_topics();
        assert_eq!(completed.len(), 1);
        assert!(completed.contains("A"));
    }

    #[test]
    fn roundtrips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut progress = Progress::default();
        progress.language_mut("Java").record_quiz("Methods", 75, true);
        progress.save_to(path.clone()).unwrap();

        let loaded = Progress::load_from(path).unwrap();
        let topic = loaded.language("Java").unwrap().topic("Methods").unwrap();
        assert_eq!(topic.best_quiz_score, 75);
        assert!(topic.completed);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Progress::load_from(dir.path().join("nope.json")).unwrap();
        assert!(loaded.languages.is_empty());
    }
}
