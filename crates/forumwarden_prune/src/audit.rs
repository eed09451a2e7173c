//! Audit export of prune decisions.
//!
//! Every flagged thread becomes one [`AuditRecord`] so an operator can review
//! a dry run before executing it.

use crate::PruneReport;
use derive_getters::Getters;
use forumwarden_core::{GuildId, PendingDecision, PruneReason, ThreadId, UserId};
use forumwarden_error::AuditResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, instrument};

/// Export file format.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AuditFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// Pretty-printed JSON array.
    Json,
}

/// One flagged thread, flattened for export.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AuditRecord {
    thread_id: ThreadId,
    reason: PruneReason,
    owner_id: UserId,
    name: String,
    /// RFC 3339.
    created_at: String,
    permalink: String,
}

impl AuditRecord {
    /// Project a decision into a record.
    pub fn from_decision(guild_id: GuildId, decision: &PendingDecision) -> Self {
        Self {
            thread_id: *decision.thread_id(),
            reason: *decision.reason(),
            owner_id: *decision.owner_id(),
            name: decision.name().clone(),
            created_at: decision.created_at().to_rfc3339(),
            permalink: permalink(guild_id, *decision.thread_id()),
        }
    }

    /// Records for every flagged thread in a report, in report order.
    pub fn from_report(report: &PruneReport) -> Vec<Self> {
        report
            .flagged()
            .iter()
            .map(|decision| Self::from_decision(*report.guild_id(), decision))
            .collect()
    }
}

/// Browser link to a thread.
pub fn permalink(guild_id: GuildId, thread_id: ThreadId) -> String {
    format!("https://discord.com/channels/{guild_id}/{thread_id}")
}

const CSV_HEADER: [&str; 6] = [
    "thread_id",
    "reason",
    "owner_id",
    "name",
    "created_at",
    "permalink",
];

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row<W: Write>(writer: &mut W, fields: &[&str]) -> AuditResult<()> {
    let line = fields
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")?;
    Ok(())
}

/// Write records as CSV with a header row.
///
/// Fields containing a comma, quote, CR or LF are quoted and embedded quotes
/// are doubled.
///
/// # Examples
///
/// ```
/// use forumwarden_core::{ForumId, GuildId, PendingDecision, PruneReason, ThreadId, ThreadMeta, UserId};
/// use forumwarden_prune::{AuditRecord, write_csv};
///
/// let thread = ThreadMeta::new(ThreadId(1 << 22), ForumId(1), UserId(7), "Hades, again");
/// let decision = PendingDecision::flag(&thread, PruneReason::DuplicateOlder);
/// let records = vec![AuditRecord::from_decision(GuildId(5), &decision)];
///
/// let mut out = Vec::new();
/// write_csv(&records, &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("\"Hades, again\""));
/// ```
pub fn write_csv<W: Write>(records: &[AuditRecord], mut writer: W) -> AuditResult<()> {
    csv_row(&mut writer, &CSV_HEADER)?;
    for record in records {
        let thread_id = record.thread_id.to_string();
        let owner_id = record.owner_id.to_string();
        csv_row(
            &mut writer,
            &[
                &thread_id,
                record.reason.as_ref(),
                &owner_id,
                &record.name,
                &record.created_at,
                &record.permalink,
            ],
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_json<W: Write>(records: &[AuditRecord], mut writer: W) -> AuditResult<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a report's flagged threads to `path`.
///
/// Returns the number of records written.
#[instrument(skip_all, fields(path = %path.as_ref().display(), format = %format))]
pub fn export_report(
    report: &PruneReport,
    path: impl AsRef<Path>,
    format: AuditFormat,
) -> AuditResult<usize> {
    let records = AuditRecord::from_report(report);
    let writer = BufWriter::new(File::create(path.as_ref())?);
    match format {
        AuditFormat::Csv => write_csv(&records, writer)?,
        AuditFormat::Json => write_json(&records, writer)?,
    }
    info!(records = records.len(), "Wrote audit export");
    Ok(records.len())
}
