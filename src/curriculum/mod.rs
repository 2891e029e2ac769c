//! Topic graph definitions
//!
//! Each supported language has a fixed progression of topics. A topic carries
//! a level, a description, and the set of topic names that must be completed
//! before it unlocks. The graph is immutable once built.

pub mod resolver;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single learning unit within a language, gated by prerequisites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Display name, unique within its language
    pub name: String,
    /// Position in the progression (1-indexed)
    pub level: u32,
    /// Short summary shown on the dashboard
    pub description: String,
    /// Names of topics that must be completed first
    pub prerequisites: BTreeSet<String>,
}

impl Topic {
    /// Create a topic with no prerequisites
    pub fn new(name: impl Into<String>, level: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            description: description.into(),
            prerequisites: BTreeSet::new(),
        }
    }

    /// Add a prerequisite topic name
    pub fn requires(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisites.insert(prerequisite.into());
        self
    }
}

/// The full topic progression for one language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicGraph {
    /// Language this graph belongs to
    pub language: String,
    /// Topics in level order
    pub topics: Vec<Topic>,
}

impl TopicGraph {
    /// Look up a topic by name
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Number of topics in this language
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether the graph has no topics
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Topic names in level order
    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.name.as_str())
    }
}

/// Languages with a built-in progression
pub fn supported_languages() -> &'static [&'static str] {
    &["Python", "Java", "C", "JavaScript"]
}

/// Build the topic graph for a language, if supported
pub fn graph_for(language: &str) -> Option<TopicGraph> {
    let topics = match language {
        "Python" => linear_progression(&[
            ("Variables and Data Types", "Learn about variables, numbers, strings, and basic data types"),
            ("Control Structures", "Master if statements, loops, and conditional logic"),
            ("Functions", "Create reusable code with functions and parameters"),
            ("Lists and Dictionaries", "Work with collections and data structures"),
            ("File Handling", "Read from and write to files"),
            ("Object-Oriented Programming", "Classes, objects, inheritance, and encapsulation"),
        ]),
        "Java" => linear_progression(&[
            ("Variables and Data Types", "Learn Java syntax, variables, and primitive data types"),
            ("Control Structures", "Master if-else, loops, and switch statements"),
            ("Methods", "Create and use methods in Java"),
            ("Arrays and Collections", "Work with arrays, ArrayList, and other collections"),
            ("Object-Oriented Programming", "Classes, objects, inheritance, and polymorphism"),
            ("Exception Handling", "Handle errors and exceptions gracefully"),
        ]),
        "C" => linear_progression(&[
            ("Variables and Data Types", "Learn C syntax, variables, and basic data types"),
            ("Control Structures", "Master if-else, loops, and conditional statements"),
            ("Functions", "Create and use functions in C"),
            ("Arrays and Strings", "Work with arrays and string manipulation"),
            ("Pointers", "Understand memory addresses and pointer operations"),
            ("Structures and Unions", "Group related data using structures"),
        ]),
        "JavaScript" => linear_progression(&[
            ("Variables and Data Types", "Learn JavaScript variables, strings, numbers, and booleans"),
            ("Control Structures", "Master if-else, loops, and conditional logic"),
            ("Functions", "Create functions, arrow functions, and closures"),
            ("Arrays and Objects", "Work with arrays, objects, and JSON"),
            ("DOM Manipulation", "Interact with HTML elements and events"),
            ("Asynchronous JavaScript", "Promises, async/await, and API calls"),
        ]),
        _ => return None,
    };

    Some(TopicGraph { language: language.to_string(), topics })
}

/// Build a chain of topics where each requires the one before it
fn linear_progression(entries: &[(&str, &str)]) -> Vec<Topic> {
    let mut topics = Vec::with_capacity(entries.len());
    for (i, (name, description)) in entries.iter().enumerate() {
        let mut topic = Topic::new(*name, (i + 1) as u32, *description);
        if i > 0 {
            topic = topic.requires(entries[i - 1].0);
        }
        topics.push(topic);
    }
    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_supported_languages_have_graphs() {
        for lang in supported_languages() {
            let graph = graph_for(lang).unwrap();
            assert_eq!(graph.language, *lang);
            assert_eq!(graph.len(), 6);
        }
    }

    #[test]
    fn unknown_language_has_no_graph() {
        assert!(graph_for("COBOL").is_none());
    }

    #[test]
    fn first_topic_has_no_prerequisites() {
        let graph = graph_for("Python").unwrap();
        assert!(graph.topics[0].prerequisites.is_empty());
    }

    #[test]
    fn later_topics_require_previous_level() {
        let graph = graph_for("Python").unwrap();
        for pair in graph.topics.windows(2) {
            assert!(pair[1].prerequisites.contains(&pair[0].name));
        }
    }

    #[test]
    fn topic_lookup_by_name() {
        let graph = graph_for("C").unwrap();
        let topic = graph.topic("Pointers").unwrap();
        assert_eq!(topic.level, 5);
        assert!(topic.prerequisites.contains("Arrays and Strings"));
    }
}
