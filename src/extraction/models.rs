use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Event information extracted from free text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CalendarEvent {
    /// Short descriptive label of the event
    pub name: String,
    /// Date or time as phrased in the source text
    pub date: String,
    /// Participant names in order of first mention
    pub participants: Vec<String>,
}
