//! Quiz configuration
//!
//! Chosen by the user during setup and immutable once a session starts.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Question counts offered in setup
pub const ALLOWED_QUESTION_COUNTS: [usize; 4] = [3, 5, 8, 10];

/// Quiz difficulty tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Basic concepts with simple multiple choice questions
    #[default]
    Easy,
    /// Intermediate concepts with mixed question types
    Medium,
    /// Advanced concepts requiring deeper understanding
    Hard,
    /// Complex problems testing mastery of the topic
    Expert,
}

impl Difficulty {
    /// All tiers in ascending order
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Expert]
    }

    /// Minutes the service allots per question at this tier
    pub fn minutes_per_question(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
            Difficulty::Expert => 8,
        }
    }

    /// One-line description shown in setup
    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Basic concepts with simple multiple choice questions",
            Difficulty::Medium => "Intermediate concepts with mixed question types",
            Difficulty::Hard => "Advanced concepts requiring deeper understanding",
            Difficulty::Expert => "Complex problems testing mastery of the topic",
        }
    }

    /// Next tier up, saturating at `Expert`
    pub fn harder(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard | Difficulty::Expert => Difficulty::Expert,
        }
    }

    /// Next tier down, saturating at `Easy`
    pub fn easier(self) -> Difficulty {
        match self {
            Difficulty::Easy | Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Expert => Difficulty::Hard,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        };
        write!(f, "{}", name)
    }
}

/// What a quiz covers: one topic, or a set of completed topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizTarget {
    /// Standard single-topic quiz
    Topic(String),
    /// Custom quiz over distinct completed topics
    Topics(BTreeSet<String>),
}

impl QuizTarget {
    /// The single topic name, if this is a single-topic quiz
    pub fn single_topic(&self) -> Option<&str> {
        match self {
            QuizTarget::Topic(topic) => Some(topic),
            QuizTarget::Topics(_) => None,
        }
    }

    /// Display label for headers
    pub fn label(&self) -> String {
        match self {
            QuizTarget::Topic(topic) => topic.clone(),
            QuizTarget::Topics(topics) => {
                format!("Custom ({} topics)", topics.len())
            }
        }
    }
}

/// Configuration for one quiz attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Programming language
    pub language: String,
    /// Topic or topic set being quizzed
    pub target: QuizTarget,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Requested question count
    pub num_questions: usize,
}

impl QuizConfig {
    /// Build a validated configuration.
    ///
    /// The question count is checked here, before any request is issued.
    pub fn new(
        language: impl Into<String>,
        target: QuizTarget,
        difficulty: Difficulty,
        num_questions: usize,
    ) -> Result<Self, ValidationError> {
        if !ALLOWED_QUESTION_COUNTS.contains(&num_questions) {
            return Err(ValidationError::InvalidQuestionCount(num_questions));
        }

        Ok(Self { language: language.into(), target, difficulty, num_questions })
    }

    /// Estimated total minutes at this difficulty and count
    pub fn estimated_minutes(&self) -> u32 {
        self.difficulty.minutes_per_question() * self.num_questions as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> QuizTarget {
        QuizTarget::Topic("Functions".into())
    }

    #[test]
    fn accepts_offered_question_counts() {
        for count in ALLOWED_QUESTION_COUNTS {
            assert!(QuizConfig::new("Python", target(), Difficulty::Easy, count).is_ok());
        }
    }

    #[test]
    fn rejects_zero_questions() {
        let err = QuizConfig::new("Python", target(), Difficulty::Easy, 0).unwrap_err();
        assert_eq!(err, ValidationError::InvalidQuestionCount(0));
    }

    #[test]
    fn rejects_count_above_maximum() {
        let err = QuizConfig::new("Python", target(), Difficulty::Easy, 50).unwrap_err();
        assert_eq!(err, ValidationError::InvalidQuestionCount(50));
    }

    #[test]
    fn rejects_unoffered_count_within_bounds() {
        assert!(QuizConfig::new("Python", target(), Difficulty::Easy, 4).is_err());
    }

    #[test]
    fn estimated_minutes_scales_with_difficulty() {
        let easy = QuizConfig::new("Python", target(), Difficulty::Easy, 5).unwrap();
        let expert = QuizConfig::new("Python", target(), Difficulty::Expert, 5).unwrap();
        assert_eq!(easy.estimated_minutes(), 10);
        assert_eq!(expert.estimated_minutes(), 40);
    }

    #[test]
    fn difficulty_cycling_saturates() {
        assert_eq!(Difficulty::Expert.harder(), Difficulty::Expert);
        assert_eq!(Difficulty::Easy.easier(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.harder(), Difficulty::Medium);
        assert_eq!(Difficulty::Expert.easier(), Difficulty::Hard);
    }

    #[test]
    fn target_label_for_custom_quiz() {
        let topics: std::collections::BTreeSet<String> =
            ["Functions".to_string(), "Pointers".to_string()].into();
        assert_eq!(QuizTarget::Topics(topics).label(), "Custom (2 topics)");
    }
}
