use crate::core::course_registry::CourseRegistry;
use crate::core::enrollment::EnrollmentEngine;
use crate::core::student_registry::StudentRegistry;
use crate::core::transcript;
use crate::domain::model::{Course, Enrollment, Grade};
use crate::utils::error::{EntityKind, RecordsError, Result};

/// The whole in-memory dataset for one process run. Callers drive the
/// registries directly and go through this type for anything that crosses
/// entities.
#[derive(Debug, Default)]
pub struct Campus {
    pub students: StudentRegistry,
    pub courses: CourseRegistry,
    pub enrollments: EnrollmentEngine,
}

impl Campus {
    pub fn new(max_credits_per_semester: u32) -> Self {
        Self {
            students: StudentRegistry::new(),
            courses: CourseRegistry::new(),
            enrollments: EnrollmentEngine::new(max_credits_per_semester),
        }
    }

    pub fn enroll(&mut self, reg_no: &str, course_code: &str) -> Result<&Enrollment> {
        self.enrollments
            .enroll(&mut self.students, &self.courses, reg_no, course_code)
    }

    pub fn unenroll(&mut self, reg_no: &str, course_code: &str) {
        self.enrollments
            .unenroll(&mut self.students, reg_no, course_code);
    }

    pub fn record_grade(&mut self, reg_no: &str, course_code: &str, grade: Grade) -> Result<()> {
        self.enrollments.record_grade(reg_no, course_code, grade)
    }

    pub fn gpa(&self, reg_no: &str) -> Result<f64> {
        self.students
            .find(reg_no)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Student, reg_no))?;
        Ok(transcript::compute_gpa(
            &self.enrollments.enrollments_for_student(reg_no),
        ))
    }

    pub fn transcript(&self, reg_no: &str) -> Result<String> {
        let student = self
            .students
            .find(reg_no)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Student, reg_no))?;
        Ok(transcript::render_transcript(
            &student.full_name,
            &self.enrollments.enrollments_for_student(reg_no),
        ))
    }

    pub fn courses_with_no_enrollments(&self) -> Vec<Course> {
        self.courses
            .find_with_no_enrollments(&self.enrollments.all_enrollments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Semester;

    #[test]
    fn test_transcript_for_graded_student() {
        let mut campus = Campus::new(18);
        campus.students.add("S1", "Ada Lovelace", "ada@uni.edu").unwrap();
        for code in ["C1", "C2"] {
            campus
                .courses
                .add(Course::new(code, "Course", 4, "Dr. X", Semester::Fall, "CS").unwrap())
                .unwrap();
        }

        campus.enroll("S1", "C1").unwrap();
        campus.enroll("S1", "C2").unwrap();
        campus.record_grade("S1", "C1", Grade::A).unwrap();
        campus.record_grade("S1", "C2", Grade::B).unwrap();

        assert_eq!(campus.gpa("S1").unwrap(), 8.5);
        assert!(campus.transcript("S1").unwrap().contains("Cumulative GPA: 8.50"));
        assert!(matches!(
            campus.transcript("S9"),
            Err(RecordsError::NotFound { entity: EntityKind::Student, .. })
        ));
    }

    #[test]
    fn test_courses_with_no_enrollments() {
        let mut campus = Campus::default();
        campus.students.add("S1", "Ada Lovelace", "ada@uni.edu").unwrap();
        for code in ["C1", "C2", "C3"] {
            campus
                .courses
                .add(Course::new(code, "Course", 3, "Dr. X", Semester::Spring, "CS").unwrap())
                .unwrap();
        }
        campus.enroll("S1", "C1").unwrap();

        let idle: Vec<String> = campus
            .courses_with_no_enrollments()
            .iter()
            .map(|c| c.code().to_string())
            .collect();
        assert_eq!(idle, vec!["C2", "C3"]);
    }
}
