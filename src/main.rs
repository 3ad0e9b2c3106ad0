//! Resume tailor: keyword-driven resume annotation and cover letters

use clap::Parser;
use log::{error, info, warn};
use resume_tailor::cli::{self, Cli, Commands, ConfigAction};
use resume_tailor::config::Config;
use resume_tailor::input::InputManager;
use resume_tailor::output::export::{export_to_file, ExportFormat};
use resume_tailor::output::formatter::{save_report_to_file, ConsoleFormatter, ReportGenerator};
use resume_tailor::output::report::TailoringReport;
use resume_tailor::processing::diff::DiffRenderer;
use resume_tailor::processing::engine::{TailorRequest, TailoringEngine};
use resume_tailor::server;
use resume_tailor::{Result, TailorError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) if matches!(cli.command, Commands::Config { action: Some(ConfigAction::Reset) }) => {
            warn!("Ignoring unreadable configuration: {}", e);
            Config::default()
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Tailor {
            resume,
            job,
            identity,
            detailed,
            output,
            save,
            export,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(TailorError::InvalidInput)?,
                None => config.output.format,
            };
            if let Some(target) = &export {
                if target.extension().is_some() {
                    cli::validate_file_extension(target, &["txt", "pdf", "docx"])
                        .map_err(|e| TailorError::InvalidInput(format!("Export file: {}", e)))?;
                }
            }

            info!("Tailoring {} against {}", resume.display(), job.display());

            let mut input_manager = InputManager::new();
            let resume_input = input_manager.ingest(&resume).await;
            let job_input = input_manager.ingest(&job).await;
            let ingest_warnings = [&resume_input.warning, &job_input.warning]
                .into_iter()
                .flatten()
                .cloned()
                .collect::<Vec<_>>();

            let engine = TailoringEngine::new(&config);
            let outcome = engine.tailor(&TailorRequest {
                resume_text: resume_input.text,
                job_text: job_input.text,
                identity: identity.into_identity(),
            });

            let report = TailoringReport::from_outcome(outcome)
                .with_sources(resume.to_string_lossy(), job.to_string_lossy())
                .with_leading_warnings(ingest_warnings);

            match &save {
                Some(path) => {
                    // No ANSI codes in files
                    let generator = ReportGenerator::with_options(false, detailed, true, true, true);
                    let content = generator.generate_report(&report, &output_format)?;
                    save_report_to_file(&content, path)?;
                    println!("Report saved to {}", path.display());
                }
                None => {
                    let generator =
                        ReportGenerator::with_options(config.output.color_output, detailed, true, true, true);
                    println!("{}", generator.generate_report(&report, &output_format)?);
                }
            }

            if let Some(target) = export {
                let target = export_target(target, ExportFormat::matching(resume_input.file_type));
                let written = export_to_file(&report.tailored, &target)?;
                println!("Tailored resume written to {}", written.display());
            }
        }

        Commands::Keywords { job, max, json } => {
            let mut config = config;
            if let Some(max) = max {
                config.extraction.max_keywords = max;
            }

            let job_input = InputManager::new().ingest(&job).await;
            if let Some(warning) = &job_input.warning {
                warn!("{}", warning);
            }

            let engine = TailoringEngine::new(&config);
            let keywords = engine.keywords(&job_input.text);

            if json {
                println!("{}", serde_json::to_string_pretty(&keywords)?);
            } else if keywords.is_empty() {
                println!("No keywords found in {}", job.display());
            } else {
                for (i, keyword) in keywords.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, keyword);
                }
            }
        }

        Commands::CoverLetter { job, identity, save } => {
            let job_input = InputManager::new().ingest(&job).await;
            if let Some(warning) = &job_input.warning {
                warn!("{}", warning);
            }

            let engine = TailoringEngine::new(&config);
            let letter = engine.cover_letter(&identity.into_identity(), &job_input.text);

            match save {
                Some(path) => {
                    let target = export_target(path, ExportFormat::Txt);
                    let written = export_to_file(&letter, &target)?;
                    println!("Cover letter written to {}", written.display());
                }
                None => print!("{}", letter),
            }
        }

        Commands::Diff { original, revised, html } => {
            let mut input_manager = InputManager::new();
            let original_input = input_manager.ingest(&original).await;
            let revised_input = input_manager.ingest(&revised).await;
            for warning in [&original_input.warning, &revised_input.warning].into_iter().flatten() {
                warn!("{}", warning);
            }

            let renderer = DiffRenderer::new(config.diff.max_cells);
            let (spans, markup) = renderer.render_with_spans(&original_input.text, &revised_input.text);

            if html || spans.is_empty() {
                println!("{}", markup);
            } else {
                let console = ConsoleFormatter::new(config.output.color_output, true);
                println!("{}", console.format_diff(&spans));
            }
        }

        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            info!("Starting resume-tailor API v{}", env!("CARGO_PKG_VERSION"));
            server::run_server(&config, &host, port).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration file: {}\n", config_path.display());
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| TailorError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults at {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Give an extension-less target the format of the source document
fn export_target(target: PathBuf, default_format: ExportFormat) -> PathBuf {
    if target.extension().is_some() {
        target
    } else {
        target.with_extension(default_format.extension())
    }
}
