use anyhow::Result;
use campus_records::core::{Grade, Semester};
use campus_records::{Campus, ImportExportService, LocalStorage, TomlConfig};
use tempfile::TempDir;

fn service(dir: &TempDir) -> ImportExportService<LocalStorage> {
    let config = TomlConfig::default().with_data_dir(Some(dir.path().to_path_buf()));
    ImportExportService::new(LocalStorage::new(dir.path()), &config)
}

#[tokio::test]
async fn test_import_all_from_csv_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    tokio::fs::write(
        root.join("students.csv"),
        "regNo,fullName,email\n\
         S1, Ada Lovelace ,ada@uni.edu\n\
         S2,Alan Turing,alan@uni.edu\n\
         S1,Duplicate Ada,dup@uni.edu\n\
         S3,Missing Email\n",
    )
    .await?;
    tokio::fs::write(
        root.join("courses.csv"),
        "code,title,credits,instructor,semester,department\n\
         C1,Algorithms,10,Dr. Knuth,fall,CS\n\
         C2,Compilers,9,Dr. Aho,FALL,CS\n\
         C3,Databases,4,Dr. Codd,Spring,CS\n\
         c1,Copy,3,Dr. X,FALL,CS\n\
         C4,Bad Credits,three,Dr. X,FALL,CS\n\
         C5,Bad Term,3,Dr. X,WINTER,CS\n",
    )
    .await?;
    tokio::fs::write(
        root.join("enrollments.csv"),
        "regNo,courseCode\n\
         S1,C1\n\
         S1,C2\n\
         S1,C1\n\
         S2,C3\n\
         S9,C3\n\
         S2,C9\n",
    )
    .await?;

    let mut campus = Campus::new(18);
    let report = service(&temp_dir).import_all(&mut campus).await?;

    assert_eq!(report.students.imported, 2);
    assert_eq!(report.students.skipped, 1);
    assert_eq!(report.students.rejected.len(), 1);
    assert_eq!(report.students.rejected[0].line, 5);
    assert_eq!(campus.students.find("S1").unwrap().full_name, "Ada Lovelace");

    assert_eq!(report.courses.imported, 3);
    assert_eq!(report.courses.skipped, 1);
    assert_eq!(report.courses.rejected.len(), 2);
    assert_eq!(campus.courses.find("C3").unwrap().semester(), Semester::Spring);

    // S1,C1 ok; S1,C2 over the ceiling; S1,C1 duplicate; S2,C3 ok; two unknown references
    assert_eq!(report.enrollments.imported, 2);
    assert_eq!(report.enrollments.rejected.len(), 4);
    assert!(report.enrollments.rejected[0].reason.contains("Credit limit"));
    assert_eq!(campus.enrollments.all_enrollments().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_missing_files_import_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut campus = Campus::default();

    let report = service(&temp_dir).import_all(&mut campus).await?;

    assert_eq!(report.students.imported, 0);
    assert!(report.courses.rejected.is_empty());
    assert!(campus.students.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_export_then_reimport_restores_dataset() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let io = service(&temp_dir);

    let mut campus = Campus::new(18);
    campus.students.add("S1", "Ada Lovelace", "ada@uni.edu")?;
    campus.students.add("S2", "Turing, Alan", "alan@uni.edu")?;
    campus.courses.add(campus_records::core::Course::new(
        "C1",
        "Logic, Sets and Proofs",
        4,
        "Dr. Boole",
        Semester::Summer,
        "Math",
    )?)?;
    campus.enroll("S2", "C1")?;
    campus.record_grade("S2", "C1", Grade::A)?;

    io.export_all(&campus).await?;

    let students_csv = tokio::fs::read_to_string(temp_dir.path().join("students.csv")).await?;
    assert!(students_csv.starts_with("regNo,fullName,email\n"));
    assert!(students_csv.contains("\"Turing, Alan\""));
    let courses_csv = tokio::fs::read_to_string(temp_dir.path().join("courses.csv")).await?;
    assert!(courses_csv.contains("C1,\"Logic, Sets and Proofs\",4,Dr. Boole,SUMMER,Math"));
    let enrollments_csv =
        tokio::fs::read_to_string(temp_dir.path().join("enrollments.csv")).await?;
    assert_eq!(enrollments_csv, "regNo,courseCode\nS2,C1\n");

    let mut restored = Campus::new(18);
    let report = io.import_all(&mut restored).await?;
    assert_eq!(report.students.imported, 2);
    assert_eq!(restored.students.find("S2").unwrap().full_name, "Turing, Alan");
    assert_eq!(restored.courses.find("C1").unwrap().title(), "Logic, Sets and Proofs");
    assert_eq!(restored.enrollments.enrollments_for_student("S2").len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_reimport_is_idempotent_for_students_and_courses() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(
        temp_dir.path().join("students.csv"),
        "regNo,fullName,email\nS1,Ada Lovelace,ada@uni.edu\n",
    )
    .await?;

    let io = service(&temp_dir);
    let mut campus = Campus::default();
    io.import_all(&mut campus).await?;
    let second = io.import_all(&mut campus).await?;

    assert_eq!(second.students.imported, 0);
    assert_eq!(second.students.skipped, 1);
    assert_eq!(campus.students.len(), 1);
    Ok(())
}
