use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-system storage rooted at a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(full_path, data).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        fs::try_exists(self.base_path.join(path))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("nested/students.csv", b"regNo\n").await.unwrap();

        assert!(storage.exists("nested/students.csv").await);
        assert!(!storage.exists("missing.csv").await);
        assert_eq!(
            storage.read_file("nested/students.csv").await.unwrap(),
            b"regNo\n".to_vec()
        );
    }
}
