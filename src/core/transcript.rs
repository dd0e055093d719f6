//! GPA and transcript rendering. Pure functions over enrollment snapshots.

use crate::domain::model::Enrollment;
use std::fmt;

const RULE: &str = "--------------------------------------------------";

/// Credit-weighted grade-point average. Ungraded and failed courses are left
/// out of both the quality points and the credit total; with nothing left the
/// GPA is `0.0`.
pub fn compute_gpa(enrollments: &[Enrollment]) -> f64 {
    let (points, credits) = enrollments
        .iter()
        .filter(|enrollment| enrollment.grade.counts_toward_gpa())
        .fold((0.0, 0.0), |(points, credits), enrollment| {
            let course_credits = f64::from(enrollment.course().credits());
            let quality = f64::from(enrollment.grade.grade_point()) * course_credits;
            (points + quality, credits + course_credits)
        });

    if credits == 0.0 {
        0.0
    } else {
        points / f64::from(credits)
    }
}

pub fn render_transcript(student_name: &str, enrollments: &[Enrollment]) -> String {
    Transcript {
        student_name,
        enrollments,
    }
    .to_string()
}

struct Transcript<'a> {
    student_name: &'a str,
    enrollments: &'a [Enrollment],
}

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Transcript for: {} ---", self.student_name)?;
        writeln!(f, "{}", RULE)?;
        for enrollment in self.enrollments {
            writeln!(
                f,
                "{:<10} | {:<30} | Grade: {}",
                enrollment.course().code(),
                enrollment.course().title(),
                enrollment.grade
            )?;
        }
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Cumulative GPA: {:.2}", compute_gpa(self.enrollments))?;
        writeln!(f, "{}", RULE)
    }
}
