use crate::core::enrollment::DEFAULT_MAX_CREDITS_PER_SEMESTER;
use crate::core::ConfigProvider;
use crate::utils::error::{RecordsError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub paths: PathsConfig,
    pub files: FilesConfig,
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub backup_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            backup_dir: PathBuf::from("backup"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub students: String,
    pub courses: String,
    pub enrollments: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            students: "students.csv".to_string(),
            courses: "courses.csv".to_string(),
            enrollments: "enrollments.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub max_credits_per_semester: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_credits_per_semester: DEFAULT_MAX_CREDITS_PER_SEMESTER,
        }
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RecordsError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RecordsError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RecordsError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.paths.data_dir = dir;
        }
        self
    }

    pub fn with_backup_dir(mut self, backup_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = backup_dir {
            self.paths.backup_dir = dir;
        }
        self
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("paths.data_dir", &self.paths.data_dir.to_string_lossy())?;
        validate_path("paths.backup_dir", &self.paths.backup_dir.to_string_lossy())?;
        validate_path("files.students", &self.files.students)?;
        validate_path("files.courses", &self.files.courses)?;
        validate_path("files.enrollments", &self.files.enrollments)?;
        validate_positive_number(
            "rules.max_credits_per_semester",
            self.rules.max_credits_per_semester,
            1,
        )?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &Path {
        &self.paths.data_dir
    }

    fn backup_dir(&self) -> &Path {
        &self.paths.backup_dir
    }

    fn students_file(&self) -> &str {
        &self.files.students
    }

    fn courses_file(&self) -> &str {
        &self.files.courses
    }

    fn enrollments_file(&self) -> &str {
        &self.files.enrollments
    }

    fn max_credits_per_semester(&self) -> u32 {
        self.rules.max_credits_per_semester
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
