// Collaborators around the core: file exchange, backups, reports and the operator console.

pub mod backup;
pub mod import_export;
pub mod menu;
pub mod reports;
