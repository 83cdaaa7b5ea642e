use askama::Template;
use event_extractor::error::ExtractionError;
use event_extractor::extraction::{CalendarEvent, SAMPLE_TEXT};
use serde::Deserialize;
use serde_json::json;

/// Choices offered by the activity selector
pub const ACTIVITIES: [&str; 5] = ["Programming", "Walking", "Reading", "Sports", "Other"];

pub const DEFAULT_AGE: u8 = 25;
pub const MAX_AGE: u8 = 120;

/// Which button submitted the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    /// A widget changed; just re-render
    Update,
    /// "Extract Event Info"
    Extract,
    /// "Click me!"
    Click,
}

/// Widget values posted by the page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShellForm {
    pub name: Option<String>,
    pub age: Option<String>,
    pub activity: Option<String>,
    pub event_text: Option<String>,
    pub action: Option<String>,
}

impl ShellForm {
    pub fn action(&self) -> ShellAction {
        match self.action.as_deref() {
            Some("extract") => ShellAction::Extract,
            Some("click") => ShellAction::Click,
            _ => ShellAction::Update,
        }
    }

    /// Text to extract from; the sample sentence when the field was never sent
    pub fn event_text(&self) -> &str {
        self.event_text.as_deref().unwrap_or(SAMPLE_TEXT)
    }
}

pub struct ActivityOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the demo page renders
#[derive(Template)]
#[template(path = "demo_shell.html")]
pub struct ShellPage {
    pub name: String,
    pub greeting: Option<String>,
    pub age: u8,
    pub max_age: u8,
    pub activity: String,
    pub activities: Vec<ActivityOption>,
    pub event_text: String,
    pub result_json: Option<String>,
    pub clicked: bool,
}

impl ShellPage {
    /// Build the page from posted widget values and an optional extraction outcome
    pub fn from_form(
        form: &ShellForm,
        outcome: Option<Result<CalendarEvent, ExtractionError>>,
    ) -> Self {
        let name = form.name.clone().unwrap_or_default();
        let greeting = Some(name.trim())
            .filter(|n| !n.is_empty())
            .map(|n| format!("Hello, {}! 👋", n));

        let age = form
            .age
            .as_deref()
            .and_then(|a| a.trim().parse::<i64>().ok())
            .map(|a| a.clamp(0, i64::from(MAX_AGE)) as u8)
            .unwrap_or(DEFAULT_AGE);

        let activity = form
            .activity
            .as_deref()
            .filter(|a| ACTIVITIES.contains(a))
            .unwrap_or(ACTIVITIES[0])
            .to_string();

        let activities = ACTIVITIES
            .iter()
            .map(|&label| ActivityOption {
                label,
                selected: label == activity,
            })
            .collect();

        Self {
            name,
            greeting,
            age,
            max_age: MAX_AGE,
            activity,
            activities,
            event_text: form.event_text().to_string(),
            result_json: outcome.map(|result| render_outcome(&result)),
            clicked: form.action() == ShellAction::Click,
        }
    }
}

impl Default for ShellPage {
    fn default() -> Self {
        Self::from_form(&ShellForm::default(), None)
    }
}

/// Pretty JSON for the result panel: the event, or `{"error": ...}`
pub fn render_outcome(result: &Result<CalendarEvent, ExtractionError>) -> String {
    let rendered = match result {
        Ok(event) => serde_json::to_string_pretty(event),
        Err(e) => serde_json::to_string_pretty(&json!({ "error": e.description() })),
    };
    rendered.unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
}
