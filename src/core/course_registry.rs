use crate::domain::model::{Course, Enrollment, Semester};
use crate::utils::error::{EntityKind, RecordsError, Result};
use std::collections::{HashMap, HashSet};

/// In-memory store of courses. Codes are compared case-insensitively.
#[derive(Debug, Default)]
pub struct CourseRegistry {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

fn key(code: &str) -> String {
    code.to_ascii_uppercase()
}

impl CourseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, course: Course) -> Result<()> {
        let key = key(course.code());
        if self.index.contains_key(&key) {
            return Err(RecordsError::DuplicateKey {
                entity: EntityKind::Course,
                key: course.code().to_string(),
            });
        }

        self.index.insert(key, self.courses.len());
        self.courses.push(course);
        Ok(())
    }

    pub fn find(&self, code: &str) -> Option<&Course> {
        self.index
            .get(&key(code))
            .map(|&position| &self.courses[position])
    }

    pub fn list_all(&self) -> Vec<Course> {
        self.courses.clone()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Replaces the course with a copy carrying the new instructor. The
    /// replacement keeps the original's position in the listing.
    pub fn update_instructor(&mut self, code: &str, new_instructor: &str) -> Result<()> {
        let position = *self
            .index
            .get(&key(code))
            .ok_or_else(|| RecordsError::not_found(EntityKind::Course, code))?;

        let replacement = self.courses[position].with_instructor(new_instructor)?;
        self.courses[position] = replacement;
        Ok(())
    }

    pub fn filter_by_instructor(&self, name: &str) -> Vec<Course> {
        self.filter(|course| course.instructor().eq_ignore_ascii_case(name))
    }

    pub fn filter_by_department(&self, name: &str) -> Vec<Course> {
        self.filter(|course| course.department().eq_ignore_ascii_case(name))
    }

    pub fn filter_by_semester(&self, semester: Semester) -> Vec<Course> {
        self.filter(|course| course.semester() == semester)
    }

    /// Courses whose code appears in none of the given enrollments.
    pub fn find_with_no_enrollments(&self, all_enrollments: &[Enrollment]) -> Vec<Course> {
        let enrolled: HashSet<String> = all_enrollments
            .iter()
            .map(|enrollment| key(enrollment.course().code()))
            .collect();

        self.filter(|course| !enrolled.contains(&key(course.code())))
    }

    fn filter<F>(&self, predicate: F) -> Vec<Course>
    where
        F: Fn(&Course) -> bool,
    {
        self.courses
            .iter()
            .filter(|course| predicate(course))
            .cloned()
            .collect()
    }
}
