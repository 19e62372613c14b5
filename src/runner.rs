//! End-to-end initialization run
//!
//! Probe → discover → register → summarize, strictly in that order.

use std::io::Write;
use std::path::PathBuf;

use crate::client::RegistryApi;
use crate::config::InitConfig;
use crate::console::{Console, Tone};
use crate::discovery::scan_schema_dir;
use crate::error::{InitError, Result};
use crate::probe::wait_for_registry;
use crate::registrar::Registrar;
use crate::report::{RunOutcome, RunSummary};

/// Drives one initialization run against a registry
pub struct Initializer<'a, A: RegistryApi + ?Sized, W: Write> {
    config: &'a InitConfig,
    api: &'a A,
    console: &'a mut Console<W>,
    report_path: Option<PathBuf>,
}

impl<'a, A: RegistryApi + ?Sized, W: Write> Initializer<'a, A, W> {
    pub fn new(config: &'a InitConfig, api: &'a A, console: &'a mut Console<W>) -> Self {
        Self {
            config,
            api,
            console,
            report_path: None,
        }
    }

    /// Write a JSON report of the run to `path` once all files are attempted
    pub fn with_report(mut self, path: Option<PathBuf>) -> Self {
        self.report_path = path;
        self
    }

    /// Run to completion. `Err` is always one of the fatal conditions and has
    /// already been reported on the console.
    pub fn run(self) -> Result<RunOutcome> {
        let Self {
            config,
            api,
            console,
            report_path,
        } = self;

        console.section('=', "Schema Registry Initialization", Tone::Heading);

        console.line(Tone::Warning, "Waiting for Schema Registry to be available...");
        match wait_for_registry(
            api,
            config.registry.probe_attempts,
            config.registry.probe_interval(),
        ) {
            Ok(attempt) => console.line(
                Tone::Success,
                format!("\u{2713} Schema Registry is ready (attempt {})", attempt),
            ),
            Err(e) => {
                console.line(Tone::Failure, format!("\u{2717} {}", e));
                return Err(e);
            }
        }

        let dir = &config.schemas.dir;
        let suffix = config.schemas.suffix();
        let listing = match scan_schema_dir(dir, &suffix) {
            Ok(listing) => listing,
            Err(e @ InitError::SchemaDirMissing { .. }) => {
                console.line(
                    Tone::Failure,
                    format!(
                        "\u{26A0} {} directory not found in container. Mount ./schemas to {}.",
                        dir.display(),
                        dir.display()
                    ),
                );
                return Err(e);
            }
            Err(e) => {
                console.line(Tone::Failure, format!("\u{26A0} {}", e));
                return Err(e);
            }
        };

        for path in &listing.skipped {
            console.line(
                Tone::Warning,
                format!(
                    "\u{26A0} Skipping {} (file name is not valid UTF-8)",
                    path.display()
                ),
            );
        }

        let files = listing.files;
        if files.is_empty() {
            console.line(
                Tone::Warning,
                format!(
                    "\u{26A0} No {} schema files found in {} directory",
                    suffix,
                    dir.display()
                ),
            );
            return Ok(RunOutcome::NothingToDo);
        }

        console.blank();
        console.line(
            Tone::Info,
            format!("Found {} schema file(s) to register:", files.len()),
        );
        for file in &files {
            console.line(Tone::Info, format!("  \u{2022} {}", file.name));
        }

        console.blank();
        console.section('-', "Registering schemas...", Tone::Bold);

        let results = Registrar::new(api, &config.registry.subject_suffix)
            .register_all(&files, console);

        let summary = RunSummary {
            registry_url: config.registry_url().to_string(),
            results,
        };
        summary.print(console);

        if let Some(path) = report_path {
            match summary.write_report(&path) {
                Ok(()) => tracing::info!(path = %path.display(), "wrote registration report"),
                Err(e) => console.line(
                    Tone::Warning,
                    format!("\u{26A0} Could not write report to {}: {}", path.display(), e),
                ),
            }
        }

        Ok(RunOutcome::Completed(summary))
    }
}
