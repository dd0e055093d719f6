use crate::core::campus::Campus;
use crate::core::course_registry::CourseRegistry;
use crate::core::student_registry::StudentRegistry;
use crate::core::{ConfigProvider, Course, Enrollment, Semester, Storage, Student};
use crate::utils::error::{RecordsError, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;

const STUDENT_HEADER: [&str; 3] = ["regNo", "fullName", "email"];
const COURSE_HEADER: [&str; 6] = ["code", "title", "credits", "instructor", "semester", "department"];
const ENROLLMENT_HEADER: [&str; 2] = ["regNo", "courseCode"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub line: u64,
    pub reason: String,
}

/// Outcome of importing one file. Duplicate keys count as `skipped`; lines that
/// could not be applied for any other reason are listed in `rejected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub rejected: Vec<RejectedLine>,
}

impl ImportSummary {
    fn reject(&mut self, line: u64, reason: impl Into<String>) {
        self.rejected.push(RejectedLine {
            line,
            reason: reason.into(),
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub students: ImportSummary,
    pub courses: ImportSummary,
    pub enrollments: ImportSummary,
}

#[derive(Serialize)]
struct StudentRow<'a> {
    reg_no: &'a str,
    full_name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct CourseRow<'a> {
    code: &'a str,
    title: &'a str,
    credits: u32,
    instructor: &'a str,
    semester: Semester,
    department: &'a str,
}

#[derive(Serialize)]
struct EnrollmentRow<'a> {
    reg_no: &'a str,
    course_code: &'a str,
}

/// Reads and writes the CSV exchange files through a [`Storage`] backend.
pub struct ImportExportService<S: Storage> {
    storage: S,
    students_file: String,
    courses_file: String,
    enrollments_file: String,
}

impl<S: Storage> ImportExportService<S> {
    pub fn new<C: ConfigProvider>(storage: S, config: &C) -> Self {
        Self {
            storage,
            students_file: config.students_file().to_string(),
            courses_file: config.courses_file().to_string(),
            enrollments_file: config.enrollments_file().to_string(),
        }
    }

    /// Data lines of a CSV file after its header, with their line numbers.
    /// A missing file yields no lines.
    async fn read_records(&self, file: &str) -> Result<Vec<(u64, StringRecord)>> {
        if !self.storage.exists(file).await {
            tracing::debug!("{} not found, nothing to import", file);
            return Ok(Vec::new());
        }

        let data = self.storage.read_file(file).await?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data.as_slice());

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            records.push((line, record));
        }
        Ok(records)
    }

    pub async fn import_students(&self, students: &mut StudentRegistry) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (line, record) in self.read_records(&self.students_file).await? {
            let (Some(reg_no), Some(full_name), Some(email)) =
                (record.get(0), record.get(1), record.get(2))
            else {
                summary.reject(line, "expected regNo,fullName,email");
                continue;
            };

            match students.add(reg_no, full_name, email) {
                Ok(_) => summary.imported += 1,
                Err(RecordsError::DuplicateKey { .. }) => {
                    tracing::debug!("Skipping duplicate student {} on line {}", reg_no, line);
                    summary.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!("Rejected student on line {}: {}", line, e);
                    summary.reject(line, e.to_string());
                }
            }
        }

        tracing::info!(
            "Imported {} students ({} skipped, {} rejected)",
            summary.imported,
            summary.skipped,
            summary.rejected.len()
        );
        Ok(summary)
    }

    pub async fn import_courses(&self, courses: &mut CourseRegistry) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (line, record) in self.read_records(&self.courses_file).await? {
            let course = match parse_course(&record) {
                Ok(course) => course,
                Err(e) => {
                    tracing::warn!("Rejected course on line {}: {}", line, e);
                    summary.reject(line, e.to_string());
                    continue;
                }
            };

            let code = course.code().to_string();
            match courses.add(course) {
                Ok(()) => summary.imported += 1,
                Err(RecordsError::DuplicateKey { .. }) => {
                    tracing::debug!("Skipping duplicate course {} on line {}", code, line);
                    summary.skipped += 1;
                }
                Err(e) => summary.reject(line, e.to_string()),
            }
        }

        tracing::info!(
            "Imported {} courses ({} skipped, {} rejected)",
            summary.imported,
            summary.skipped,
            summary.rejected.len()
        );
        Ok(summary)
    }

    /// Enrollment failures are reported per line and never abort the import.
    pub async fn import_enrollments(&self, campus: &mut Campus) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (line, record) in self.read_records(&self.enrollments_file).await? {
            let (Some(reg_no), Some(course_code)) = (record.get(0), record.get(1)) else {
                summary.reject(line, "expected regNo,courseCode");
                continue;
            };

            match campus.enroll(reg_no, course_code) {
                Ok(_) => summary.imported += 1,
                Err(e) => {
                    tracing::warn!(
                        "Could not enroll student {} in course {}: {}",
                        reg_no,
                        course_code,
                        e
                    );
                    summary.reject(line, e.to_string());
                }
            }
        }

        tracing::info!(
            "Imported {} enrollments ({} rejected)",
            summary.imported,
            summary.rejected.len()
        );
        Ok(summary)
    }

    /// Students and courses first, since enrollments refer to both.
    pub async fn import_all(&self, campus: &mut Campus) -> Result<ImportReport> {
        let students = self.import_students(&mut campus.students).await?;
        let courses = self.import_courses(&mut campus.courses).await?;
        let enrollments = self.import_enrollments(campus).await?;
        Ok(ImportReport {
            students,
            courses,
            enrollments,
        })
    }

    pub async fn export_students(&self, students: &[Student]) -> Result<()> {
        let rows = students.iter().map(|s| StudentRow {
            reg_no: s.reg_no(),
            full_name: &s.full_name,
            email: &s.email,
        });
        let data = to_csv(&STUDENT_HEADER, rows)?;
        self.storage.write_file(&self.students_file, &data).await?;
        tracing::info!("Exported {} students to {}", students.len(), self.students_file);
        Ok(())
    }

    pub async fn export_courses(&self, courses: &[Course]) -> Result<()> {
        let rows = courses.iter().map(|c| CourseRow {
            code: c.code(),
            title: c.title(),
            credits: c.credits(),
            instructor: c.instructor(),
            semester: c.semester(),
            department: c.department(),
        });
        let data = to_csv(&COURSE_HEADER, rows)?;
        self.storage.write_file(&self.courses_file, &data).await?;
        tracing::info!("Exported {} courses to {}", courses.len(), self.courses_file);
        Ok(())
    }

    pub async fn export_enrollments(&self, enrollments: &[Enrollment]) -> Result<()> {
        let rows = enrollments.iter().map(|e| EnrollmentRow {
            reg_no: e.reg_no(),
            course_code: e.course().code(),
        });
        let data = to_csv(&ENROLLMENT_HEADER, rows)?;
        self.storage
            .write_file(&self.enrollments_file, &data)
            .await?;
        tracing::info!(
            "Exported {} enrollments to {}",
            enrollments.len(),
            self.enrollments_file
        );
        Ok(())
    }

    pub async fn export_all(&self, campus: &Campus) -> Result<()> {
        self.export_students(&campus.students.list_all()).await?;
        self.export_courses(&campus.courses.list_all()).await?;
        self.export_enrollments(&campus.enrollments.all_enrollments())
            .await
    }
}

fn parse_course(record: &StringRecord) -> Result<Course> {
    if record.len() < COURSE_HEADER.len() {
        return Err(RecordsError::validation(
            "course",
            &record.iter().collect::<Vec<_>>().join(","),
            "expected code,title,credits,instructor,semester,department",
        ));
    }

    let credits_field = &record[2];
    let credits = credits_field
        .parse::<u32>()
        .map_err(|_| RecordsError::validation("credits", credits_field, "not a positive integer"))?;
    let semester: Semester = record[4].parse()?;

    Course::new(&record[0], &record[1], credits, &record[3], semester, &record[5])
}

fn to_csv<T: Serialize>(header: &[&str], rows: impl Iterator<Item = T>) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| RecordsError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_course_line() {
        let record = StringRecord::from(vec!["CS101", "Intro", "4", "Dr. X", "fall", "CS"]);
        let course = parse_course(&record).unwrap();
        assert_eq!(course.credits(), 4);
        assert_eq!(course.semester(), Semester::Fall);

        let bad_credits = StringRecord::from(vec!["CS101", "Intro", "four", "Dr. X", "FALL", "CS"]);
        assert!(parse_course(&bad_credits).is_err());

        let bad_semester = StringRecord::from(vec!["CS101", "Intro", "4", "Dr. X", "WINTER", "CS"]);
        assert!(parse_course(&bad_semester).is_err());

        let short = StringRecord::from(vec!["CS101", "Intro", "4"]);
        assert!(parse_course(&short).is_err());
    }

    #[test]
    fn test_to_csv_writes_header_for_empty_rows() {
        let data = to_csv(&ENROLLMENT_HEADER, std::iter::empty::<EnrollmentRow>()).unwrap();
        assert_eq!(String::from_utf8(data).unwrap(), "regNo,courseCode\n");
    }
}
