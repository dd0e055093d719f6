pub mod campus;
pub mod course_registry;
pub mod enrollment;
pub mod student_registry;
pub mod transcript;

pub use crate::domain::model::{Course, Enrollment, Grade, Semester, Student, StudentStatus};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
