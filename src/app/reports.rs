use crate::core::campus::Campus;
use crate::core::{Course, Student};
use std::fmt;

const STUDENT_RULE: &str =
    "--------------------------------------------------------------------------------";
const COURSE_RULE: &str =
    "-----------------------------------------------------------------------------------------";

pub fn students_by_name(students: &[Student]) -> Vec<Student> {
    let mut sorted = students.to_vec();
    sorted.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    sorted
}

pub fn courses_by_code(courses: &[Course]) -> Vec<Course> {
    let mut sorted = courses.to_vec();
    sorted.sort_by(|a, b| a.code().cmp(b.code()));
    sorted
}

/// Students holding an enrollment in the course, in enrollment order.
pub fn students_in_course(campus: &Campus, course_code: &str) -> Vec<Student> {
    campus
        .enrollments
        .enrollments_for_course(course_code)
        .iter()
        .filter_map(|enrollment| campus.students.find(enrollment.reg_no()))
        .cloned()
        .collect()
}

pub fn student_table(students: &[Student]) -> String {
    StudentTable(students).to_string()
}

pub fn course_table(courses: &[Course]) -> String {
    CourseTable(courses).to_string()
}

struct StudentTable<'a>(&'a [Student]);

impl fmt::Display for StudentTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<15} | {:<20} | {:<30} | Status",
            "Reg No", "Full Name", "Email"
        )?;
        writeln!(f, "{}", STUDENT_RULE)?;
        for student in self.0 {
            writeln!(
                f,
                "{:<15} | {:<20} | {:<30} | {}",
                student.reg_no(),
                student.full_name,
                student.email,
                student.status
            )?;
        }
        writeln!(f, "{}", STUDENT_RULE)
    }
}

struct CourseTable<'a>(&'a [Course]);

impl fmt::Display for CourseTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} | {:<45} | {:<7} | {:<6} | Department",
            "Code", "Title", "Credits", "Term"
        )?;
        writeln!(f, "{}", COURSE_RULE)?;
        for course in self.0 {
            writeln!(
                f,
                "{:<10} | {:<45} | {:<7} | {:<6} | {}",
                course.code(),
                course.title(),
                course.credits(),
                course.semester().as_str(),
                course.department()
            )?;
        }
        writeln!(f, "{}", COURSE_RULE)
    }
}
