//! Clone completion announcement.
//!
//! Summarizes a finished clone run as an embed-shaped message. The Discord adapter turns
//! it into a Serenity `CreateEmbed` when posting.

use chrono::{DateTime, Utc};

use crate::server::model::clone::CloneReport;

/// Discord caps an embed description at 4096 characters.
pub const MAX_DESCRIPTION_LEN: usize = 4096;
/// Discord caps an embed field value at 1024 characters.
pub const MAX_FIELD_VALUE_LEN: usize = 1024;

const SUCCESS_COLOR: u32 = 0x2ecc71;
const PARTIAL_COLOR: u32 = 0xe67e22;

/// Embed summary posted into the marker channel after a clone run.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub title: String,
    pub description: String,
    /// Embed accent color, green for a clean run and orange when errors occurred.
    pub color: u32,
    /// `(name, value)` pairs rendered as non-inline embed fields.
    pub fields: Vec<(String, String)>,
    /// Time of the last report entry, shown as the embed timestamp.
    pub finished_at: Option<DateTime<Utc>>,
}

impl Announcement {
    /// Builds the summary for a finished run.
    ///
    /// The error list is joined one per line and truncated to fit a single embed field;
    /// when entries had to be dropped the field ends with a count of the omitted ones.
    ///
    /// # Arguments
    /// - `source_guild_id` - Guild that was cloned
    /// - `report` - Report of the finished run
    ///
    /// # Returns
    /// - `Announcement` - Summary ready for `DiscordApi::send_message`
    pub fn from_report(source_guild_id: u64, report: &CloneReport) -> Self {
        let error_count = report.errors().len();

        let description = truncate(
            &format!(
                "Cloned from guild `{}`.\n{} operations succeeded, {} failed.",
                source_guild_id,
                report.success_count(),
                error_count
            ),
            MAX_DESCRIPTION_LEN,
        );

        let mut fields = Vec::new();
        if error_count > 0 {
            fields.push(("Errors".to_string(), summarize_errors(report.errors())));
        }

        Self {
            title: "Server clone complete".to_string(),
            description,
            color: if error_count == 0 {
                SUCCESS_COLOR
            } else {
                PARTIAL_COLOR
            },
            fields,
            finished_at: report.entries().last().map(|entry| entry.timestamp),
        }
    }
}

fn summarize_errors(errors: &[String]) -> String {
    let mut value = String::new();

    for (index, error) in errors.iter().enumerate() {
        let line = format!("- {}", error);
        let remaining = errors.len() - index;
        let is_last = remaining == 1;

        // Room for the suffix is only needed while more lines follow.
        let reserved = if is_last {
            0
        } else {
            format!("\n... and {} more", remaining - 1).len()
        };

        if value.len() + line.len() + reserved > MAX_FIELD_VALUE_LEN {
            value.push_str(&format!("... and {} more", remaining));
            return value;
        }

        value.push_str(&line);
        if !is_last {
            value.push('\n');
        }
    }

    value
}

/// Cuts `text` to at most `max` bytes on a char boundary.
fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }

    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    text[..end].to_string()
}
