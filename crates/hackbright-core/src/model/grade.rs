use serde::{Deserialize, Serialize};

/// One row of the student/grade join: who received which grade on which
/// project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeReport {
    pub first_name: String,
    pub last_name: String,
    pub grade: i64,
    pub project_title: String,
}
