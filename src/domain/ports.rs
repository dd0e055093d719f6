use crate::utils::error::Result;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &Path;
    fn backup_dir(&self) -> &Path;
    fn students_file(&self) -> &str;
    fn courses_file(&self) -> &str;
    fn enrollments_file(&self) -> &str;
    fn max_credits_per_semester(&self) -> u32;
}
