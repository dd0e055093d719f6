use crate::core::ConfigProvider;
use crate::utils::error::{RecordsError, Result};
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::{FileOptions, ZipWriter};

/// Copies the data directory into timestamped backups.
#[derive(Debug, Clone)]
pub struct BackupService {
    data_dir: PathBuf,
    backup_root: PathBuf,
}

impl BackupService {
    pub fn new<C: ConfigProvider>(config: &C) -> Self {
        Self {
            data_dir: config.data_dir().to_path_buf(),
            backup_root: config.backup_dir().to_path_buf(),
        }
    }

    /// Copies every regular file under the data directory into
    /// `backup_root/backup_<timestamp>/`, keeping relative paths.
    pub fn backup_exports(&self) -> Result<PathBuf> {
        let files = self.source_files()?;

        let backup_dir = self.backup_root.join(format!("backup_{}", timestamp()));
        fs::create_dir_all(&backup_dir)?;

        for source in &files {
            let relative = source.strip_prefix(&self.data_dir).map_err(|_| RecordsError::Config {
                message: format!("{} is outside the data directory", source.display()),
            })?;
            let destination = backup_dir.join(relative);
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(source, &destination)?;
        }

        tracing::info!(
            "Backed up {} files to {}",
            files.len(),
            backup_dir.display()
        );
        Ok(backup_dir)
    }

    /// Same content as [`BackupService::backup_exports`], packed into a single
    /// `backup_<timestamp>.zip`.
    pub fn archive_exports(&self) -> Result<PathBuf> {
        let files = self.source_files()?;

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for source in &files {
                let name = archive_name(&self.data_dir, source);
                zip.start_file::<_, ()>(name, FileOptions::default())?;
                zip.write_all(&fs::read(source)?)?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        fs::create_dir_all(&self.backup_root)?;
        let archive = self.backup_root.join(format!("backup_{}.zip", timestamp()));
        tracing::debug!("Writing ZIP file ({} bytes)", zip_data.len());
        fs::write(&archive, zip_data)?;

        tracing::info!("Archived {} files to {}", files.len(), archive.display());
        Ok(archive)
    }

    fn source_files(&self) -> Result<Vec<PathBuf>> {
        if !self.data_dir.is_dir() {
            return Err(RecordsError::Config {
                message: format!(
                    "Source data directory {} not found. Nothing to back up.",
                    self.data_dir.display()
                ),
            });
        }
        collect_files(&self.data_dir)
    }
}

fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn archive_name(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

/// Regular files under `dir`, recursively, in path order.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            files.extend(collect_files(&path)?);
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Total size in bytes of all regular files under `path`.
pub fn directory_size(path: &Path) -> Result<u64> {
    if path.is_file() {
        return Ok(fs::metadata(path)?.len());
    }

    let mut total = 0;
    for entry in sorted_entries(path)? {
        total += directory_size(&entry)?;
    }
    Ok(total)
}

/// `path` itself followed by everything beneath it down to `max_depth` levels.
pub fn list_files(path: &Path, max_depth: usize) -> Result<Vec<PathBuf>> {
    let mut listed = vec![path.to_path_buf()];
    if max_depth > 0 && path.is_dir() {
        for entry in sorted_entries(path)? {
            listed.extend(list_files(&entry, max_depth - 1)?);
        }
    }
    Ok(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_size_and_listing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.csv"), b"12345").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("b.csv"), b"123").unwrap();

        assert_eq!(directory_size(root).unwrap(), 8);
        assert_eq!(collect_files(root).unwrap().len(), 2);

        let shallow = list_files(root, 1).unwrap();
        assert_eq!(shallow.len(), 3);
        assert_eq!(shallow[0], root.to_path_buf());
        assert_eq!(list_files(root, 2).unwrap().len(), 4);
        assert_eq!(list_files(root, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_archive_name_uses_forward_slashes() {
        let root = Path::new("data");
        assert_eq!(archive_name(root, &root.join("nested").join("b.csv")), "nested/b.csv");
    }
}
