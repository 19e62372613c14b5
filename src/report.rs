//! Run summary, exit code and JSON report

use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::console::{Console, Tone};
use crate::registrar::RegistrationResult;

/// Outcome of a completed registration pass
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub registry_url: String,
    pub results: Vec<RegistrationResult>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn successful(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }

    /// 1 if any file failed, otherwise 0
    pub fn exit_code(&self) -> i32 {
        if self.failed() > 0 {
            1
        } else {
            0
        }
    }

    /// Print the closing summary block
    pub fn print<W: Write>(&self, console: &mut Console<W>) {
        let successful = self.successful();
        let failed = self.failed();

        console.blank();
        console.section('=', "Registration Summary", Tone::Heading);
        console.line(Tone::Info, format!("Total schemas: {}", self.total()));
        console.line(
            if successful > 0 { Tone::Success } else { Tone::Info },
            format!("\u{2713} Successful: {}", successful),
        );
        console.line(
            if failed > 0 { Tone::Failure } else { Tone::Info },
            format!("\u{2717} Failed: {}", failed),
        );

        console.blank();
        if failed > 0 {
            console.line(
                Tone::Warning,
                "\u{26A0} Some schemas failed to register. Check the errors above.",
            );
        } else {
            console.line(Tone::Banner, "\u{2713} All schemas registered successfully!");
        }
        console.rule('=');
    }

    /// Machine-readable form of the run
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "generated_at": Utc::now().to_rfc3339(),
            "registry_url": self.registry_url,
            "total": self.total(),
            "successful": self.successful(),
            "failed": self.failed(),
            "results": self.results,
        })
    }

    pub fn write_report(&self, path: &Path) -> crate::Result<()> {
        let report_json = serde_json::to_string_pretty(&self.to_json())?;
        std::fs::write(path, report_json)?;
        Ok(())
    }
}

/// How a run ended, short of a fatal error
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The schema directory held no matching files
    NothingToDo,
    /// Every discovered file was attempted
    Completed(RunSummary),
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::NothingToDo => 0,
            RunOutcome::Completed(summary) => summary.exit_code(),
        }
    }
}
