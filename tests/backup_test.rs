use anyhow::Result;
use campus_records::app::backup::directory_size;
use campus_records::{BackupService, RecordsError, TomlConfig};
use std::io::Read;
use tempfile::TempDir;

fn config(root: &TempDir) -> TomlConfig {
    TomlConfig::default()
        .with_data_dir(Some(root.path().join("data")))
        .with_backup_dir(Some(root.path().join("backup")))
}

fn seed_data_dir(root: &TempDir) -> Result<()> {
    let data = root.path().join("data");
    std::fs::create_dir_all(data.join("archive"))?;
    std::fs::write(data.join("students.csv"), "regNo,fullName,email\n")?;
    std::fs::write(data.join("archive").join("old.csv"), "x")?;
    Ok(())
}

#[test]
fn test_backup_copies_data_tree() -> Result<()> {
    let root = TempDir::new()?;
    seed_data_dir(&root)?;

    let backup_dir = BackupService::new(&config(&root)).backup_exports()?;

    assert!(backup_dir.starts_with(root.path().join("backup")));
    let name = backup_dir.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("backup_"));
    assert_eq!(name.len(), "backup_20240101_120000".len());

    assert_eq!(
        std::fs::read_to_string(backup_dir.join("students.csv"))?,
        "regNo,fullName,email\n"
    );
    assert!(backup_dir.join("archive").join("old.csv").is_file());
    assert_eq!(directory_size(&backup_dir)?, directory_size(&root.path().join("data"))?);
    Ok(())
}

#[test]
fn test_archive_contains_every_file() -> Result<()> {
    let root = TempDir::new()?;
    seed_data_dir(&root)?;

    let archive_path = BackupService::new(&config(&root)).archive_exports()?;
    assert_eq!(archive_path.extension().unwrap(), "zip");

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&archive_path)?)?;
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["archive/old.csv", "students.csv"]);

    let mut content = String::new();
    archive.by_name("students.csv")?.read_to_string(&mut content)?;
    assert_eq!(content, "regNo,fullName,email\n");
    Ok(())
}

#[test]
fn test_backup_without_data_dir_fails() -> Result<()> {
    let root = TempDir::new()?;
    let err = BackupService::new(&config(&root)).backup_exports().unwrap_err();
    assert!(matches!(err, RecordsError::Config { .. }));
    assert!(!root.path().join("backup").exists());
    Ok(())
}
