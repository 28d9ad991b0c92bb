// crates/docbridge-core/src/runtime/dump.rs
// ============================================================================
// Module: Docbridge File Dump
// Description: Filesystem diagnostic dump for outgoing messages.
// Purpose: Serialize routing + message pairs to JSON audit records.
// Dependencies: crate::{core, interfaces}, serde_json, base64, time, rand
// ============================================================================

//! ## Overview
//! [`FileMessageDump`] writes one JSON audit record per dispatched message
//! into a configured directory. Binary content (payload bodies, certificate
//! DER) is base64-encoded. The dispatcher treats dump failures as non-fatal;
//! this implementation only reports them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::message::Message;
use crate::core::routing::RoutingInformation;
use crate::interfaces::DumpError;
use crate::interfaces::MessageDump;

// ============================================================================
// SECTION: File Dump
// ============================================================================

/// Filesystem dump writing one JSON record per outgoing message.
///
/// # Invariants
/// - Record filenames are unique per process (timestamp + random suffix).
/// - Records are complete JSON documents; partial writes surface as errors.
pub struct FileMessageDump {
    /// Directory receiving dump records.
    directory: PathBuf,
}

impl FileMessageDump {
    /// Creates a dump targeting `directory`, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::Io`] when the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, DumpError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| DumpError::Io {
            path: directory.display().to_string(),
            source,
        })?;
        Ok(Self {
            directory,
        })
    }

    /// Returns the dump target directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Builds the unique record path for one dump invocation.
    fn record_path(&self, now: OffsetDateTime) -> PathBuf {
        let suffix: u64 = rand::random();
        let name = format!("outgoing-{}-{suffix:016x}.json", now.unix_timestamp_nanos());
        self.directory.join(name)
    }
}

impl MessageDump for FileMessageDump {
    fn dump(&self, routing: &RoutingInformation, message: &Message) -> Result<(), DumpError> {
        let now = OffsetDateTime::now_utc();
        let record = dump_record(routing, message, now)?;
        let path = self.record_path(now);
        let rendered = serde_json::to_vec_pretty(&record)
            .map_err(|err| DumpError::Serialize(err.to_string()))?;
        fs::write(&path, rendered).map_err(|source| DumpError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

// ============================================================================
// SECTION: Record Assembly
// ============================================================================

/// Renders one routing + message pair as a JSON audit record.
fn dump_record(
    routing: &RoutingInformation,
    message: &Message,
    now: OffsetDateTime,
) -> Result<Value, DumpError> {
    let dumped_at =
        now.format(&Rfc3339).map_err(|err| DumpError::Serialize(err.to_string()))?;
    let payloads: Vec<Value> = message
        .payloads()
        .iter()
        .map(|payload| {
            json!({
                "content_id": payload.content_id(),
                "mime_type": payload.mime_type(),
                "content_b64": BASE64.encode(payload.content()),
            })
        })
        .collect();
    Ok(json!({
        "dumped_at": dumped_at,
        "sender": routing.sender(),
        "receiver": routing.receiver(),
        "document_type": routing.document_type(),
        "process": routing.process(),
        "transport_profile": routing.transport_profile(),
        "endpoint_url": routing.endpoint_url().as_str(),
        "certificate_der_b64": BASE64.encode(routing.certificate().as_ref()),
        "payloads": payloads,
    }))
}
