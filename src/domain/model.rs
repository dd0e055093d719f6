use crate::utils::error::{RecordsError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Semester {
    Spring,
    Summer,
    Fall,
}

impl Semester {
    pub const ALL: [Semester; 3] = [Semester::Spring, Semester::Summer, Semester::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::Spring => "SPRING",
            Semester::Summer => "SUMMER",
            Semester::Fall => "FALL",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        Semester::ALL
            .into_iter()
            .find(|semester| semester.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| RecordsError::validation("semester", s, "expected SPRING, SUMMER or FALL"))
    }
}

/// Letter grade with its grade point. `NotGraded` carries the -1 sentinel and
/// never takes part in GPA arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
    #[serde(rename = "NOT_GRADED")]
    NotGraded,
}

impl Grade {
    pub const ALL: [Grade; 8] = [
        Grade::S,
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::E,
        Grade::F,
        Grade::NotGraded,
    ];

    pub fn grade_point(&self) -> i32 {
        match self {
            Grade::S => 10,
            Grade::A => 9,
            Grade::B => 8,
            Grade::C => 7,
            Grade::D => 6,
            Grade::E => 5,
            Grade::F => 0,
            Grade::NotGraded => -1,
        }
    }

    /// Whether the grade contributes to GPA. Failing and ungraded courses do not.
    pub fn counts_toward_gpa(&self) -> bool {
        !matches!(self, Grade::F | Grade::NotGraded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
            Grade::NotGraded => "NOT_GRADED",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        Grade::ALL
            .into_iter()
            .find(|grade| grade.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| RecordsError::validation("grade", s, "expected one of S, A, B, C, D, E, F"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StudentStatus {
    Active,
    Deactivated,
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentStatus::Active => f.write_str("ACTIVE"),
            StudentStatus::Deactivated => f.write_str("DEACTIVATED"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Student {
    reg_no: String,
    pub full_name: String,
    pub email: String,
    pub status: StudentStatus,
    pub joined_date: NaiveDate,
    enrolled_courses: BTreeSet<String>,
}

impl Student {
    pub fn new(reg_no: &str, full_name: &str, email: &str) -> Result<Self> {
        if reg_no.is_empty() {
            return Err(RecordsError::validation(
                "reg_no",
                reg_no,
                "Registration number cannot be empty",
            ));
        }

        Ok(Self {
            reg_no: reg_no.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            status: StudentStatus::Active,
            joined_date: Local::now().date_naive(),
            enrolled_courses: BTreeSet::new(),
        })
    }

    pub fn reg_no(&self) -> &str {
        &self.reg_no
    }

    pub fn is_active(&self) -> bool {
        self.status == StudentStatus::Active
    }

    /// Course codes the student currently holds an enrollment in.
    pub fn enrolled_courses(&self) -> &BTreeSet<String> {
        &self.enrolled_courses
    }

    pub(crate) fn enroll_course(&mut self, course_code: &str) {
        self.enrolled_courses.insert(course_code.to_string());
    }

    pub(crate) fn unenroll_course(&mut self, course_code: &str) {
        self.enrolled_courses.remove(course_code);
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.reg_no == other.reg_no
    }
}

impl Eq for Student {}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student[RegNo={}, Name={}, Email={}, Status={}]",
            self.reg_no, self.full_name, self.email, self.status
        )
    }
}

/// A course offering. Fields are fixed after construction; changing one means
/// building a replacement value.
#[derive(Debug, Clone)]
pub struct Course {
    code: String,
    title: String,
    credits: u32,
    instructor: String,
    semester: Semester,
    department: String,
}

impl Course {
    pub fn new(
        code: &str,
        title: &str,
        credits: u32,
        instructor: &str,
        semester: Semester,
        department: &str,
    ) -> Result<Self> {
        validate_non_empty_string("code", code)?;
        validate_non_empty_string("title", title)?;
        validate_positive_number("credits", credits, 1)?;
        validate_non_empty_string("instructor", instructor)?;
        validate_non_empty_string("department", department)?;

        Ok(Self {
            code: code.to_string(),
            title: title.to_string(),
            credits,
            instructor: instructor.to_string(),
            semester,
            department: department.to_string(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    pub fn semester(&self) -> Semester {
        self.semester
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn with_instructor(&self, instructor: &str) -> Result<Self> {
        validate_non_empty_string("instructor", instructor)?;
        Ok(Self {
            instructor: instructor.to_string(),
            ..self.clone()
        })
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.has_code(&other.code)
    }
}

impl Eq for Course {}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} credits), Instructor: {}, Semester: {}, Department: {}",
            self.code, self.title, self.credits, self.instructor, self.semester, self.department
        )
    }
}

/// Join record between a student and a course. The student is referenced by
/// registration number; the course is held as the registry value at enrollment
/// time, which is safe because credits and semester never change.
#[derive(Debug, Clone)]
pub struct Enrollment {
    reg_no: String,
    course: Course,
    pub grade: Grade,
    enrollment_date: NaiveDate,
}

impl Enrollment {
    pub fn new(reg_no: &str, course: Course, enrollment_date: NaiveDate) -> Self {
        Self {
            reg_no: reg_no.to_string(),
            course,
            grade: Grade::NotGraded,
            enrollment_date,
        }
    }

    pub fn reg_no(&self) -> &str {
        &self.reg_no
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    pub fn matches(&self, reg_no: &str, course_code: &str) -> bool {
        self.reg_no == reg_no && self.course.has_code(course_code)
    }
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Enrollment[Student={}, Course={}, Grade={}, Date={}]",
            self.reg_no,
            self.course.code(),
            self.grade,
            self.enrollment_date
        )
    }
}
