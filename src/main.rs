use campus_records::core::ConfigProvider;
use campus_records::utils::error::ErrorCategory;
use campus_records::utils::{logger, validation::Validate};
use campus_records::{BackupService, Campus, CliConfig, ImportExportService, LocalStorage, Menu};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting campus-records");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(match e.category() {
                ErrorCategory::Config | ErrorCategory::Input => 2,
                _ => 1,
            });
        }
    };

    tracing::info!("Data directory: {}", config.data_dir().display());

    let mut campus = Campus::new(config.max_credits_per_semester());
    let io = ImportExportService::new(LocalStorage::new(config.data_dir()), &config);

    if cli.no_import {
        tracing::info!("Skipping initial import");
    } else {
        match io.import_all(&mut campus).await {
            Ok(report) => {
                println!(
                    "Initial data loaded: {} students, {} courses, {} enrollments.",
                    report.students.imported, report.courses.imported, report.enrollments.imported
                );
            }
            Err(e) => {
                tracing::error!("Initial import failed: {}", e);
                println!("Failed to load initial data: {}", e.user_friendly_message());
            }
        }
    }

    let backup = BackupService::new(&config);
    let stdin = std::io::stdin();
    let mut menu = Menu::new(campus, io, backup, stdin.lock(), std::io::stdout());
    menu.run().await?;

    tracing::info!("Session finished");
    Ok(())
}
