//! External record retrieval.
//!
//! Every call spawns the configured server, sends one `tools/call` request
//! and decodes the reply. The `try_*` operations return the tagged outcome;
//! the plain operations are the boundary that logs a failure and degrades to
//! an empty result, so callers feeding the console never see an error.

pub mod process;
pub mod protocol;

use crate::config::RetrieverConfig;
use crate::error::RetrieveError;
use crate::record::{ExternalRecord, Record};
use protocol::{TOOL_GET, TOOL_JOURNEY, TOOL_LIST, ToolCallRequest, ToolResponse, decode_response};
use serde_json::Map;
use tracing::{debug, info, warn};

/// Source of records living outside the process.
///
/// The console talks to this trait so it can be driven without a server.
pub trait RecordSource {
    /// All records the source knows about; empty on failure.
    fn list_records(&self) -> Vec<Record>;
    /// The first record matching `name`; `None` on failure or no match.
    fn find_record(&self, name: &str) -> Option<Record>;
    /// Free-form travel notes for `name`; `None` on failure or no notes.
    fn journey(&self, name: &str) -> Option<String>;
}

#[derive(Clone, Debug)]
pub struct Retriever {
    config: RetrieverConfig,
}

impl Retriever {
    pub fn new(config: RetrieverConfig) -> Self {
        Self { config }
    }

    pub fn try_list_records(&self) -> Result<Vec<Record>, RetrieveError> {
        let response = self.call(&ToolCallRequest::new(TOOL_LIST, Map::new()))?;
        Ok(convert(response.records))
    }

    pub fn try_find_record(&self, name: &str) -> Result<Option<Record>, RetrieveError> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        let response = self.call(&ToolCallRequest::named(TOOL_GET, name.trim()))?;
        Ok(convert(response.records).into_iter().next())
    }

    pub fn try_journey(&self, name: &str) -> Result<Option<String>, RetrieveError> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        let response = self.call(&ToolCallRequest::named(TOOL_JOURNEY, name.trim()))?;
        if response.notes.is_empty() {
            return Ok(None);
        }
        Ok(Some(response.notes.join("\n")))
    }

    fn call(&self, request: &ToolCallRequest) -> Result<ToolResponse, RetrieveError> {
        let line = request.to_line()?;
        debug!(request = %line.trim_end(), "sending request");
        let stdout = process::exchange(&self.config.command, &line, self.config.timeout)?;
        let response = decode_response(&stdout)?;
        for note in &response.notes {
            info!(tool = %request.params.name, "server note: {note}");
        }
        if response.skipped > 0 {
            warn!(
                tool = %request.params.name,
                skipped = response.skipped,
                "dropped unusable records from server response"
            );
        }
        Ok(response)
    }

    fn report(&self, tool: &str, err: &RetrieveError) {
        warn!(
            tool,
            kind = ?err.kind(),
            command = %self.config.command.display(),
            "server call failed: {err}"
        );
    }
}

impl RecordSource for Retriever {
    fn list_records(&self) -> Vec<Record> {
        self.try_list_records().unwrap_or_else(|err| {
            self.report(TOOL_LIST, &err);
            Vec::new()
        })
    }

    fn find_record(&self, name: &str) -> Option<Record> {
        self.try_find_record(name).unwrap_or_else(|err| {
            self.report(TOOL_GET, &err);
            None
        })
    }

    fn journey(&self, name: &str) -> Option<String> {
        self.try_journey(name).unwrap_or_else(|err| {
            self.report(TOOL_JOURNEY, &err);
            None
        })
    }
}

fn convert(records: Vec<ExternalRecord>) -> Vec<Record> {
    records
        .into_iter()
        .filter_map(ExternalRecord::into_record)
        .collect()
}
