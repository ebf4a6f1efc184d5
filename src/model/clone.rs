use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters shared by the clone endpoints.
///
/// Field names follow the original handler contract (`sourceGuildId`, `aid`, ...) so
/// existing callers keep working. Everything is optional at the wire level; presence
/// and format are checked when the DTO is converted into `CloneParams`.
#[derive(Deserialize, Serialize, Clone, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CloneQueryDto {
    /// Bot token used for every Discord API call of this run.
    pub token: Option<String>,
    /// Guild to copy from.
    pub source_guild_id: Option<String>,
    /// Guild to copy into.
    pub target_guild_id: Option<String>,
    /// Discord user id of the caller; must own the target guild.
    pub aid: Option<String>,
    /// Delete the target's channels and roles first.
    pub destructive: Option<bool>,
    /// Post a summary into a new channel of the target guild when done.
    pub announce: Option<bool>,
}

/// Result of a clone run: newline-joined progress log plus one entry per failure.
///
/// A successful status code does not imply an empty `errors` list.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CloneReportDto {
    pub output: String,
    pub errors: Vec<String>,
}
