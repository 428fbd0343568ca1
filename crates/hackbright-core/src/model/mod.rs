pub mod grade;
pub mod project;
pub mod student;

pub use grade::GradeReport;
pub use project::Project;
pub use student::Student;
