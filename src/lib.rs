//! Schema Registry Initializer
//!
//! One-shot bootstrap for a Kafka Schema Registry: waits for the registry to
//! accept connections, then registers every Avro schema found in a directory
//! under the `<file-stem>-value` subject.
//!
//! ## Run
//!
//! ```text
//! probe GET /subjects (60 × 1s)
//!   └─ list /schemas/*.avsc (sorted)
//!        └─ for each file: validate JSON → POST /subjects/<stem>-value/versions
//!             └─ summary + exit code (0 = all registered or nothing to do)
//! ```
//!
//! Per-file failures are collected and reported; only an unreachable
//! registry or a missing schema directory stop the run early.

pub mod checksum;
pub mod client;
pub mod config;
pub mod console;
pub mod discovery;
pub mod error;
pub mod probe;
pub mod registrar;
pub mod report;
pub mod runner;

pub use checksum::Checksum;
pub use client::{RegistryApi, RegistryClient, SchemaId};
pub use config::InitConfig;
pub use console::{Console, Tone};
pub use discovery::{find_schema_files, scan_schema_dir, SchemaFile, SchemaListing};
pub use error::{InitError, Result, SchemaError};
pub use probe::wait_for_registry;
pub use registrar::{Outcome, RegistrationResult, Registrar};
pub use report::{RunOutcome, RunSummary};
pub use runner::Initializer;
