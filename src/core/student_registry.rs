use crate::domain::model::{Student, StudentStatus};
use crate::utils::error::{EntityKind, RecordsError, Result};
use std::collections::HashMap;

/// In-memory store of students, keyed by registration number (case-sensitive).
#[derive(Debug, Default)]
pub struct StudentRegistry {
    students: Vec<Student>,
    index: HashMap<String, usize>,
}

impl StudentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new active student. The email is stored as given; format
    /// checks belong to the caller.
    pub fn add(&mut self, reg_no: &str, full_name: &str, email: &str) -> Result<&Student> {
        if self.index.contains_key(reg_no) {
            return Err(RecordsError::DuplicateKey {
                entity: EntityKind::Student,
                key: reg_no.to_string(),
            });
        }

        let student = Student::new(reg_no, full_name, email)?;
        let position = self.students.len();
        self.index.insert(reg_no.to_string(), position);
        self.students.push(student);
        Ok(&self.students[position])
    }

    pub fn find(&self, reg_no: &str) -> Option<&Student> {
        self.index.get(reg_no).map(|&position| &self.students[position])
    }

    pub(crate) fn find_mut(&mut self, reg_no: &str) -> Option<&mut Student> {
        match self.index.get(reg_no) {
            Some(&position) => self.students.get_mut(position),
            None => None,
        }
    }

    pub fn list_all(&self) -> Vec<Student> {
        self.students.clone()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn update_email(&mut self, reg_no: &str, new_email: &str) -> Result<()> {
        let student = self
            .find_mut(reg_no)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Student, reg_no))?;
        student.email = new_email.to_string();
        Ok(())
    }

    /// Soft-disables a student. Existing enrollments and grades are untouched.
    pub fn deactivate(&mut self, reg_no: &str) -> Result<()> {
        let student = self
            .find_mut(reg_no)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Student, reg_no))?;
        student.status = StudentStatus::Deactivated;
        Ok(())
    }
}
