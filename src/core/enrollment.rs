use crate::core::course_registry::CourseRegistry;
use crate::core::student_registry::StudentRegistry;
use crate::domain::model::{Enrollment, Grade, Semester};
use crate::utils::error::{EntityKind, RecordsError, Result};
use chrono::{Local, NaiveDate};

pub const DEFAULT_MAX_CREDITS_PER_SEMESTER: u32 = 18;

/// Owns the enrollment records and enforces the enrollment rules against the
/// student and course registries it is handed.
#[derive(Debug)]
pub struct EnrollmentEngine {
    enrollments: Vec<Enrollment>,
    max_credits_per_semester: u32,
}

impl Default for EnrollmentEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CREDITS_PER_SEMESTER)
    }
}

impl EnrollmentEngine {
    pub fn new(max_credits_per_semester: u32) -> Self {
        Self {
            enrollments: Vec::new(),
            max_credits_per_semester,
        }
    }

    pub fn max_credits_per_semester(&self) -> u32 {
        self.max_credits_per_semester
    }

    pub fn enroll(
        &mut self,
        students: &mut StudentRegistry,
        courses: &CourseRegistry,
        reg_no: &str,
        course_code: &str,
    ) -> Result<&Enrollment> {
        self.enroll_on(students, courses, reg_no, course_code, Local::now().date_naive())
    }

    /// Same as [`EnrollmentEngine::enroll`] with an explicit enrollment date.
    /// All checks run before anything is mutated.
    pub fn enroll_on(
        &mut self,
        students: &mut StudentRegistry,
        courses: &CourseRegistry,
        reg_no: &str,
        course_code: &str,
        date: NaiveDate,
    ) -> Result<&Enrollment> {
        let student = students
            .find_mut(reg_no)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Student, reg_no))?;
        let course = courses
            .find(course_code)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Course, course_code))?;

        if self.is_enrolled(reg_no, course.code()) {
            return Err(RecordsError::DuplicateEnrollment {
                reg_no: reg_no.to_string(),
                course_code: course.code().to_string(),
            });
        }

        let current = self.credits_for(reg_no, course.semester());
        let over_limit = current
            .checked_add(course.credits())
            .map_or(true, |total| total > self.max_credits_per_semester);
        if over_limit {
            return Err(RecordsError::CreditLimitExceeded {
                reg_no: reg_no.to_string(),
                semester: course.semester().to_string(),
                current,
                requested: course.credits(),
                limit: self.max_credits_per_semester,
            });
        }

        student.enroll_course(course.code());
        self.enrollments
            .push(Enrollment::new(reg_no, course.clone(), date));
        Ok(&self.enrollments[self.enrollments.len() - 1])
    }

    /// Drops the pair if present. Unknown pairs are ignored.
    pub fn unenroll(&mut self, students: &mut StudentRegistry, reg_no: &str, course_code: &str) {
        self.enrollments
            .retain(|enrollment| !enrollment.matches(reg_no, course_code));

        if let Some(student) = students.find_mut(reg_no) {
            let held: Vec<String> = student
                .enrolled_courses()
                .iter()
                .filter(|code| code.eq_ignore_ascii_case(course_code))
                .cloned()
                .collect();
            for code in held {
                student.unenroll_course(&code);
            }
        }
    }

    pub fn record_grade(&mut self, reg_no: &str, course_code: &str, grade: Grade) -> Result<()> {
        let enrollment = self
            .enrollments
            .iter_mut()
            .find(|enrollment| enrollment.matches(reg_no, course_code))
            .ok_or_else(|| {
                RecordsError::not_found(
                    EntityKind::Enrollment,
                    &format!("{}/{}", reg_no, course_code),
                )
            })?;
        enrollment.grade = grade;
        Ok(())
    }

    pub fn enrollments_for_student(&self, reg_no: &str) -> Vec<Enrollment> {
        self.enrollments
            .iter()
            .filter(|enrollment| enrollment.reg_no() == reg_no)
            .cloned()
            .collect()
    }

    pub fn enrollments_for_course(&self, course_code: &str) -> Vec<Enrollment> {
        self.enrollments
            .iter()
            .filter(|enrollment| enrollment.course().has_code(course_code))
            .cloned()
            .collect()
    }

    pub fn all_enrollments(&self) -> Vec<Enrollment> {
        self.enrollments.clone()
    }

    pub fn len(&self) -> usize {
        self.enrollments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enrollments.is_empty()
    }

    /// Credits the student currently holds in the given semester.
    pub fn credits_for(&self, reg_no: &str, semester: Semester) -> u32 {
        self.enrollments
            .iter()
            .filter(|enrollment| {
                enrollment.reg_no() == reg_no && enrollment.course().semester() == semester
            })
            .map(|enrollment| enrollment.course().credits())
            .fold(0u32, u32::saturating_add)
    }

    fn is_enrolled(&self, reg_no: &str, course_code: &str) -> bool {
        self.enrollments
            .iter()
            .any(|enrollment| enrollment.matches(reg_no, course_code))
    }
}
