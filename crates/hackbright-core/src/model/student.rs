use serde::{Deserialize, Serialize};

/// A student, identified by their GitHub account name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,

    /// GitHub account name; the primary key of `students`.
    pub github: String,
}

impl Student {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        github: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            github: github.into(),
        }
    }

    /// First and last name separated by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_new() {
        let student = Student::new("Jane", "Hacker", "jhacks");
        assert_eq!(student.first_name, "Jane");
        assert_eq!(student.last_name, "Hacker");
        assert_eq!(student.github, "jhacks");
    }

    #[test]
    fn test_full_name() {
        let student = Student::new("Sarah", "Developer", "sdevelops");
        assert_eq!(student.full_name(), "Sarah Developer");
    }
}
