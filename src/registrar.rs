//! Per-file schema registration
//!
//! Every file is attempted exactly once, in the order given. Failures are
//! captured as [`RegistrationResult`]s and never stop the loop.

use std::fs;
use std::io::Write;

use serde::Serialize;

use crate::checksum::Checksum;
use crate::client::{RegistryApi, SchemaId};
use crate::console::{Console, Tone};
use crate::discovery::SchemaFile;
use crate::error::SchemaError;

/// How a single file fared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success { id: SchemaId },
    Failed { error: String },
}

/// Result of registering one schema file
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResult {
    /// File name, e.g. `order.avsc`
    pub file: String,
    /// File name without extension
    pub stem: String,
    /// Registry subject the schema was submitted under
    pub subject: String,
    /// Digest of the file content, when it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Checksum>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl RegistrationResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

/// Registers schema files against a registry
pub struct Registrar<'a, A: RegistryApi + ?Sized> {
    api: &'a A,
    subject_suffix: &'a str,
}

impl<'a, A: RegistryApi + ?Sized> Registrar<'a, A> {
    pub fn new(api: &'a A, subject_suffix: &'a str) -> Self {
        Self { api, subject_suffix }
    }

    /// Register a single file: read, validate as JSON, then submit
    pub fn register_file(&self, file: &SchemaFile) -> RegistrationResult {
        self.attempt(file).0
    }

    /// Register `file`, returning the result and the text shown on its console line
    fn attempt(&self, file: &SchemaFile) -> (RegistrationResult, String) {
        let subject = file.subject(self.subject_suffix);

        let content = fs::read_to_string(&file.path);
        let checksum = content.as_deref().ok().map(Checksum::of_text);
        if let Some(checksum) = &checksum {
            tracing::debug!(file = %file.name, checksum = checksum.short(), "read schema");
        }

        let (outcome, shown) = match content
            .map_err(SchemaError::from)
            .and_then(|schema| self.submit(&subject, &schema))
        {
            Ok(id) => {
                let shown = format!("ID: {}", id);
                (Outcome::Success { id }, shown)
            }
            Err(e) => {
                let shown = match e {
                    SchemaError::Http { .. } => e.to_string(),
                    _ => format!("Error: {}", e),
                };
                (Outcome::Failed { error: e.to_string() }, shown)
            }
        };

        let result = RegistrationResult {
            file: file.name.clone(),
            stem: file.stem.clone(),
            subject,
            checksum,
            outcome,
        };
        (result, shown)
    }

    /// Register every file in order, printing one line per file
    pub fn register_all<W: Write>(
        &self,
        files: &[SchemaFile],
        console: &mut Console<W>,
    ) -> Vec<RegistrationResult> {
        files
            .iter()
            .map(|file| {
                let (result, shown) = self.attempt(file);
                let (tone, glyph) = if result.is_success() {
                    (Tone::Success, '\u{2713}')
                } else {
                    (Tone::Failure, '\u{2717}')
                };
                console.line(
                    tone,
                    format!("{} {:<50} \u{2192} {}", glyph, result.file, shown),
                );
                result
            })
            .collect()
    }

    fn submit(&self, subject: &str, schema: &str) -> Result<SchemaId, SchemaError> {
        // Malformed files never reach the network.
        serde_json::from_str::<serde_json::Value>(schema)?;
        self.api.register(subject, schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;

    /// Records submissions and answers from a fixed script
    struct Recorder {
        submitted: RefCell<Vec<String>>,
        reject: Option<&'static str>,
    }

    impl Recorder {
        fn new() -> Self {
            Self { submitted: RefCell::new(Vec::new()), reject: None }
        }
    }

    impl RegistryApi for Recorder {
        fn ping(&self) -> Result<(), SchemaError> {
            Ok(())
        }

        fn register(&self, subject: &str, _schema: &str) -> Result<SchemaId, SchemaError> {
            self.submitted.borrow_mut().push(subject.to_string());
            if self.reject == Some(subject) {
                return Err(SchemaError::Http {
                    status: 422,
                    message: "Invalid schema".to_string(),
                });
            }
            Ok(self.submitted.borrow().len().to_string())
        }
    }

    fn schema_file(dir: &Path, name: &str, content: &str) -> SchemaFile {
        std::fs::write(dir.join(name), content).unwrap();
        SchemaFile {
            name: name.to_string(),
            stem: name.trim_end_matches(".avsc").to_string(),
            path: dir.join(name),
        }
    }

    #[test]
    fn test_malformed_file_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let bad = schema_file(dir.path(), "bad.avsc", "{invalid");
        let api = Recorder::new();

        let result = Registrar::new(&api, "-value").register_file(&bad);

        assert!(api.submitted.borrow().is_empty());
        assert_eq!(result.subject, "bad-value");
        assert!(result.checksum.is_some());
        match result.outcome {
            Outcome::Failed { error } => assert!(error.starts_with("Invalid JSON")),
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_failures_do_not_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            schema_file(dir.path(), "a.avsc", r#"{"type": "string"}"#),
            schema_file(dir.path(), "b.avsc", r#"{"type": "long"}"#),
            schema_file(dir.path(), "c.avsc", "not json"),
            schema_file(dir.path(), "d.avsc", r#"{"type": "int"}"#),
        ];
        let api = Recorder { reject: Some("b-value"), ..Recorder::new() };
        let mut console = Console::new(Vec::new(), false);

        let results = Registrar::new(&api, "-value").register_all(&files, &mut console);

        assert_eq!(results.len(), 4);
        assert_eq!(
            *api.submitted.borrow(),
            vec!["a-value", "b-value", "d-value"]
        );
        let statuses: Vec<_> = results.iter().map(|r| r.is_success()).collect();
        assert_eq!(statuses, vec![true, false, false, true]);
        assert_eq!(
            results[1].outcome,
            Outcome::Failed { error: "HTTP 422: Invalid schema".to_string() }
        );

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.contains(&format!("\u{2713} {:<50} \u{2192} ID: 1", "a.avsc")));
        assert!(out.contains(&format!("\u{2717} {:<50} \u{2192} HTTP 422: Invalid schema\n", "b.avsc")));
        assert!(out.contains(&format!("\u{2717} {:<50} \u{2192} Error: Invalid JSON: ", "c.avsc")));
        assert!(!out.contains("Error: HTTP"));
        match &results[2].outcome {
            Outcome::Failed { error } => assert!(error.starts_with("Invalid JSON: ")),
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_file_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let missing = SchemaFile {
            name: "gone.avsc".to_string(),
            stem: "gone".to_string(),
            path: dir.path().join("gone.avsc"),
        };
        let api = Recorder::new();

        let result = Registrar::new(&api, "-value").register_file(&missing);

        assert!(!result.is_success());
        assert!(result.checksum.is_none());
        assert!(api.submitted.borrow().is_empty());
    }

    #[test]
    fn test_result_serializes_with_status_tag() {
        let result = RegistrationResult {
            file: "order.avsc".to_string(),
            stem: "order".to_string(),
            subject: "order-value".to_string(),
            checksum: None,
            outcome: Outcome::Success { id: "3".to_string() },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["id"], "3");
        assert_eq!(json["subject"], "order-value");
        assert!(json.get("checksum").is_none());
    }
}
