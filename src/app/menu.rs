use crate::app::backup::{directory_size, list_files, BackupService};
use crate::app::import_export::{ImportExportService, ImportSummary};
use crate::app::reports;
use crate::core::campus::Campus;
use crate::core::{Course, Grade, Semester, Storage};
use crate::utils::error::{RecordsError, Result};
use crate::utils::validation::validate_email;
use std::io::{BufRead, Write};

const BACKUP_LISTING_DEPTH: usize = 3;

/// Line-oriented operator console over a [`Campus`].
pub struct Menu<R: BufRead, W: Write, S: Storage> {
    campus: Campus,
    io: ImportExportService<S>,
    backup: BackupService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, S: Storage> Menu<R, W, S> {
    pub fn new(
        campus: Campus,
        io: ImportExportService<S>,
        backup: BackupService,
        input: R,
        output: W,
    ) -> Self {
        Self {
            campus,
            io,
            backup,
            input,
            output,
        }
    }

    pub fn campus(&self) -> &Campus {
        &self.campus
    }

    pub fn into_parts(self) -> (Campus, W) {
        (self.campus, self.output)
    }

    /// Runs until the operator picks "Exit" or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.print_main_menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };

            let outcome = match choice.as_str() {
                "1" => self.manage_students(),
                "2" => self.manage_courses(),
                "3" => self.manage_enrollment(),
                "4" => self.record_grade(),
                "5" => self.print_transcript(),
                "6" => self.import_export().await,
                "7" => self.backup_data(),
                "8" => self.show_reports(),
                "9" => {
                    writeln!(self.output, "Exiting program. Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                tracing::debug!("Menu action failed: {}", e);
                writeln!(self.output, "Error: {}", e.user_friendly_message())?;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn print_main_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Campus Course & Records Manager ===")?;
        writeln!(self.output, "1. Manage Students")?;
        writeln!(self.output, "2. Manage Courses")?;
        writeln!(self.output, "3. Manage Enrollment")?;
        writeln!(self.output, "4. Record Grades")?;
        writeln!(self.output, "5. Print Transcript")?;
        writeln!(self.output, "6. Import/Export Data")?;
        writeln!(self.output, "7. Backup Data")?;
        writeln!(self.output, "8. Reports")?;
        writeln!(self.output, "9. Exit")?;
        write!(self.output, "Select an option from the menu: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn submenu(&mut self, title: &str, options: &[&str]) -> Result<String> {
        writeln!(self.output)?;
        writeln!(self.output, "-- {} --", title)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }
        self.prompt("Enter your choice: ")
    }

    fn manage_students(&mut self) -> Result<()> {
        let choice = self.submenu(
            "Student Management",
            &[
                "Add Student",
                "List Students",
                "Update Student Email",
                "Deactivate Student",
                "Back to main menu",
            ],
        )?;

        match choice.as_str() {
            "1" => {
                let reg_no = self.prompt("Enter registration number: ")?;
                let full_name = self.prompt("Enter full name: ")?;
                let email = self.prompt("Enter email: ")?;
                validate_email("email", &email)?;
                self.campus.students.add(&reg_no, &full_name, &email)?;
                writeln!(self.output, "Student added successfully.")?;
            }
            "2" => {
                let table = reports::student_table(&self.campus.students.list_all());
                write!(self.output, "{}", table)?;
            }
            "3" => {
                let reg_no = self.prompt("Enter student registration number to update: ")?;
                let email = self.prompt("Enter new email: ")?;
                validate_email("email", &email)?;
                self.campus.students.update_email(&reg_no, &email)?;
                writeln!(self.output, "Student email updated successfully.")?;
            }
            "4" => {
                let reg_no = self.prompt("Enter student registration number to deactivate: ")?;
                self.campus.students.deactivate(&reg_no)?;
                writeln!(self.output, "Student deactivated successfully.")?;
            }
            "5" => {}
            _ => writeln!(self.output, "Invalid option.")?,
        }
        Ok(())
    }

    fn manage_courses(&mut self) -> Result<()> {
        let choice = self.submenu(
            "Course Management",
            &[
                "Add Course",
                "List Courses",
                "Update Course Instructor",
                "Search Courses",
                "Back to main menu",
            ],
        )?;

        match choice.as_str() {
            "1" => {
                let code = self.prompt("Enter course code: ")?;
                let title = self.prompt("Enter title: ")?;
                let credits = self.prompt("Enter credits: ")?;
                let credits = credits.parse::<u32>().map_err(|_| {
                    RecordsError::validation("credits", &credits, "not a positive integer")
                })?;
                let instructor = self.prompt("Enter instructor: ")?;
                let semester: Semester = self
                    .prompt("Enter semester (SPRING, SUMMER, FALL): ")?
                    .parse()?;
                let department = self.prompt("Enter department: ")?;

                let course = Course::new(&code, &title, credits, &instructor, semester, &department)?;
                self.campus.courses.add(course)?;
                writeln!(self.output, "Course added successfully.")?;
            }
            "2" => {
                let table = reports::course_table(&self.campus.courses.list_all());
                write!(self.output, "{}", table)?;
            }
            "3" => {
                let code = self.prompt("Enter course code: ")?;
                let instructor = self.prompt("Enter new instructor: ")?;
                self.campus.courses.update_instructor(&code, &instructor)?;
                writeln!(self.output, "Course instructor updated successfully.")?;
            }
            "4" => self.search_courses()?,
            "5" => {}
            _ => writeln!(self.output, "Invalid option.")?,
        }
        Ok(())
    }

    fn search_courses(&mut self) -> Result<()> {
        let choice = self.submenu(
            "Search Courses",
            &["By Instructor", "By Department", "By Semester"],
        )?;

        let found = match choice.as_str() {
            "1" => {
                let name = self.prompt("Enter instructor name: ")?;
                self.campus.courses.filter_by_instructor(&name)
            }
            "2" => {
                let name = self.prompt("Enter department name: ")?;
                self.campus.courses.filter_by_department(&name)
            }
            "3" => {
                let semester: Semester = self
                    .prompt("Enter semester (SPRING, SUMMER, FALL): ")?
                    .parse()?;
                self.campus.courses.filter_by_semester(semester)
            }
            _ => {
                writeln!(self.output, "Invalid option.")?;
                return Ok(());
            }
        };

        self.print_courses(&found, "No matching courses found.")
    }

    fn print_courses(&mut self, courses: &[Course], empty_message: &str) -> Result<()> {
        if courses.is_empty() {
            writeln!(self.output, "{}", empty_message)?;
        }
        for course in courses {
            writeln!(self.output, "{}", course)?;
        }
        Ok(())
    }

    fn manage_enrollment(&mut self) -> Result<()> {
        let choice = self.submenu(
            "Enrollment Management",
            &[
                "Enroll Student in Course",
                "Unenroll Student from Course",
                "Back to main menu",
            ],
        )?;

        match choice.as_str() {
            "1" => {
                let reg_no = self.prompt("Enter student registration number: ")?;
                let code = self.prompt("Enter course code: ")?;
                self.campus.enroll(&reg_no, &code)?;
                writeln!(self.output, "Student enrolled successfully.")?;
            }
            "2" => {
                let reg_no = self.prompt("Enter student registration number: ")?;
                let code = self.prompt("Enter course code: ")?;
                self.campus.unenroll(&reg_no, &code);
                writeln!(self.output, "Student unenrolled successfully.")?;
            }
            "3" => {}
            _ => writeln!(self.output, "Invalid option.")?,
        }
        Ok(())
    }

    fn record_grade(&mut self) -> Result<()> {
        let reg_no = self.prompt("Enter student registration number: ")?;
        let code = self.prompt("Enter course code: ")?;
        let grade: Grade = self.prompt("Enter grade (S, A, B, C, D, E, F): ")?.parse()?;
        self.campus.record_grade(&reg_no, &code, grade)?;
        writeln!(self.output, "Grade recorded successfully.")?;
        Ok(())
    }

    fn print_transcript(&mut self) -> Result<()> {
        let reg_no = self.prompt("Enter student registration number: ")?;
        let transcript = self.campus.transcript(&reg_no)?;
        writeln!(self.output)?;
        write!(self.output, "{}", transcript)?;
        Ok(())
    }

    async fn import_export(&mut self) -> Result<()> {
        let choice = self.submenu(
            "Import/Export Data",
            &["Import All Data", "Export All Data", "Back to main menu"],
        )?;

        match choice.as_str() {
            "1" => {
                let report = self.io.import_all(&mut self.campus).await?;
                for (label, summary) in [
                    ("students", &report.students),
                    ("courses", &report.courses),
                    ("enrollments", &report.enrollments),
                ] {
                    write_summary(&mut self.output, label, summary)?;
                }
                writeln!(self.output, "Data re-imported successfully.")?;
            }
            "2" => {
                self.io.export_all(&self.campus).await?;
                writeln!(self.output, "Data exported successfully.")?;
            }
            "3" => {}
            _ => writeln!(self.output, "Invalid option.")?,
        }
        Ok(())
    }

    fn backup_data(&mut self) -> Result<()> {
        let choice = self.submenu(
            "Backup Data",
            &["Backup to folder", "Backup to zip archive", "Back to main menu"],
        )?;

        let target = match choice.as_str() {
            "1" => self.backup.backup_exports()?,
            "2" => self.backup.archive_exports()?,
            "3" => return Ok(()),
            _ => {
                writeln!(self.output, "Invalid option.")?;
                return Ok(());
            }
        };

        writeln!(self.output, "Backup completed successfully at: {}", target.display())?;
        writeln!(self.output, "Backup size: {} bytes", directory_size(&target)?)?;

        writeln!(self.output, "Backup contents:")?;
        let base = target.parent().unwrap_or(target.as_path());
        for entry in list_files(&target, BACKUP_LISTING_DEPTH)? {
            let shown = entry.strip_prefix(base).unwrap_or(entry.as_path());
            writeln!(self.output, "  {}", shown.display())?;
        }
        Ok(())
    }

    fn show_reports(&mut self) -> Result<()> {
        let choice = self.submenu(
            "Reports",
            &[
                "List Courses by Department",
                "List Students in a Course",
                "List Courses with No Enrollments",
                "List Students by Name",
                "Back to Main Menu",
            ],
        )?;

        match choice.as_str() {
            "1" => {
                let department = self.prompt("Enter department name: ")?;
                writeln!(self.output, "--- Courses in {} ---", department)?;
                let courses =
                    reports::courses_by_code(&self.campus.courses.filter_by_department(&department));
                self.print_courses(&courses, "No courses found for this department.")?;
            }
            "2" => {
                let code = self.prompt("Enter course code: ")?;
                writeln!(self.output, "--- Students in course {} ---", code)?;
                let students = reports::students_in_course(&self.campus, &code);
                if students.is_empty() {
                    writeln!(self.output, "No students are enrolled in this course.")?;
                }
                for student in students {
                    writeln!(self.output, "{}", student)?;
                }
            }
            "3" => {
                writeln!(self.output, "--- Courses with No Enrollments ---")?;
                let idle = self.campus.courses_with_no_enrollments();
                if idle.is_empty() {
                    writeln!(self.output, "All courses have at least one student enrolled.")?;
                }
                for course in idle {
                    writeln!(self.output, "{:<10} | {}", course.code(), course.title())?;
                }
            }
            "4" => {
                let sorted = reports::students_by_name(&self.campus.students.list_all());
                write!(self.output, "{}", reports::student_table(&sorted))?;
            }
            "5" => {}
            _ => writeln!(self.output, "Invalid option.")?,
        }
        Ok(())
    }
}

fn write_summary<W: Write>(output: &mut W, label: &str, summary: &ImportSummary) -> Result<()> {
    writeln!(
        output,
        "Imported {} {} ({} skipped as duplicates)",
        summary.imported, label, summary.skipped
    )?;
    for rejected in &summary.rejected {
        writeln!(output, "  line {}: {}", rejected.line, rejected.reason)?;
    }
    Ok(())
}
