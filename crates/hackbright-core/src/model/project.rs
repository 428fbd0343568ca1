use serde::{Deserialize, Serialize};

/// A class project with the highest grade a student can receive on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project title; the primary key of `projects`.
    pub title: String,
    pub description: String,
    pub max_grade: i64,
}

impl Project {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, max_grade: i64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            max_grade,
        }
    }
}
