pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use app::{backup::BackupService, import_export::ImportExportService, menu::Menu};
pub use core::{
    campus::Campus, course_registry::CourseRegistry, enrollment::EnrollmentEngine,
    student_registry::StudentRegistry,
};
pub use utils::error::{RecordsError, Result};
