//! Clone pipeline domain models.
//!
//! Contains the validated parameters of a clone run, the transient category id map that
//! bridges category creation and child parenting, and the append-only report that is
//! rendered into the HTTP response.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::{
    model::clone::{CloneQueryDto, CloneReportDto},
    server::{error::AppError, util::parse::parse_snowflake},
};

/// Validated parameters for one clone run.
#[derive(Debug, Clone, PartialEq)]
pub struct CloneParams {
    /// Guild that resources are read from.
    pub source_guild_id: u64,
    /// Guild that resources are written to.
    pub target_guild_id: u64,
    /// Delete every existing channel and role in the target before materializing.
    pub destructive: bool,
    /// Discord user requesting the clone; checked against the target guild's owner.
    pub caller_id: Option<u64>,
}

impl CloneParams {
    /// Converts the query DTO into validated parameters.
    ///
    /// # Arguments
    /// - `dto` - Raw query parameters from the request
    ///
    /// # Returns
    /// - `Ok(CloneParams)` - Ids parsed and combination accepted
    /// - `Err(AppError::BadRequest)` - Missing or malformed id, identical source and
    ///   target, or a destructive request without a caller id
    pub fn from_dto(dto: &CloneQueryDto) -> Result<Self, AppError> {
        let source_guild_id = parse_snowflake("sourceGuildId", dto.source_guild_id.as_deref())?;
        let target_guild_id = parse_snowflake("targetGuildId", dto.target_guild_id.as_deref())?;

        let caller_id = match dto.aid.as_deref() {
            Some(aid) if !aid.trim().is_empty() => Some(parse_snowflake("aid", Some(aid))?),
            _ => None,
        };

        let destructive = dto.destructive.unwrap_or(false);

        Self::new(source_guild_id, target_guild_id, destructive, caller_id)
    }

    /// Converts the query DTO for a single-stage run.
    ///
    /// Single-stage endpoints never tear down the target, so `destructive` is ignored
    /// and never triggers the caller id requirement.
    pub fn stage_from_dto(dto: &CloneQueryDto) -> Result<Self, AppError> {
        Self::from_dto(&CloneQueryDto {
            destructive: None,
            ..dto.clone()
        })
    }

    /// Creates parameters from already-parsed ids, applying the same validation as
    /// [`CloneParams::from_dto`].
    pub fn new(
        source_guild_id: u64,
        target_guild_id: u64,
        destructive: bool,
        caller_id: Option<u64>,
    ) -> Result<Self, AppError> {
        if source_guild_id == target_guild_id {
            return Err(AppError::BadRequest(
                "sourceGuildId and targetGuildId must differ".to_string(),
            ));
        }

        if destructive && caller_id.is_none() {
            return Err(AppError::BadRequest(
                "aid is required for destructive operations".to_string(),
            ));
        }

        Ok(Self {
            source_guild_id,
            target_guild_id,
            destructive,
            caller_id,
        })
    }
}

/// Validated parameters for a standalone teardown.
///
/// Teardown is always destructive, so the caller id is mandatory.
#[derive(Debug, Clone, PartialEq)]
pub struct TeardownParams {
    pub target_guild_id: u64,
    pub caller_id: u64,
}

impl TeardownParams {
    pub fn from_dto(dto: &CloneQueryDto) -> Result<Self, AppError> {
        let target_guild_id = parse_snowflake("targetGuildId", dto.target_guild_id.as_deref())?;

        let caller_id = match dto.aid.as_deref() {
            Some(aid) if !aid.trim().is_empty() => parse_snowflake("aid", Some(aid))?,
            _ => {
                return Err(AppError::BadRequest(
                    "aid is required for destructive operations".to_string(),
                ))
            }
        };

        Ok(Self {
            target_guild_id,
            caller_id,
        })
    }
}

/// Source category id to target category id, filled by Phase A and read by Phase B.
///
/// Only categories that were actually created in the target guild during the current
/// run are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMap {
    ids: HashMap<u64, u64>,
}

impl CategoryMap {
    /// Records that `source_id` was recreated in the target guild as `target_id`.
    pub fn insert(&mut self, source_id: u64, target_id: u64) {
        self.ids.insert(source_id, target_id);
    }

    /// Target id for a source category, if that category was created.
    pub fn get(&self, source_id: u64) -> Option<u64> {
        self.ids.get(&source_id).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Severity of a report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Success,
    Error,
}

/// One line of the progress log.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub timestamp: DateTime<Utc>,
    pub level: ReportLevel,
    pub message: String,
}

/// Output of a clone run: an ordered progress log and one error per failed operation.
///
/// Entries are only ever appended. The log is rendered to text at the response
/// boundary by [`CloneReport::into_dto`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloneReport {
    entries: Vec<ReportEntry>,
    errors: Vec<String>,
}

impl CloneReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an informational line.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ReportLevel::Info, message.into());
    }

    /// Appends a line for an operation that succeeded.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ReportLevel::Success, message.into());
    }

    /// Appends a line for an operation that failed and records it in the error list.
    pub fn failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.errors.push(message.clone());
        self.push(ReportLevel::Error, message);
    }

    fn push(&mut self, level: ReportLevel, message: String) {
        self.entries.push(ReportEntry {
            timestamp: Utc::now(),
            level,
            message,
        });
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of operations that completed successfully.
    pub fn success_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.level == ReportLevel::Success)
            .count()
    }

    /// Renders the progress log as newline-joined text.
    pub fn render_output(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Converts the report to the response DTO.
    pub fn into_dto(self) -> CloneReportDto {
        CloneReportDto {
            output: self.render_output(),
            errors: self.errors,
        }
    }
}
