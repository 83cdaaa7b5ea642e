use askama::Template;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
};
use event_extractor::error::Error;
use tracing::{error, info};

use crate::model::{ShellAction, ShellForm, ShellPage};
use crate::ShellState;

fn render(page: ShellPage) -> Result<Html<String>, StatusCode> {
    page.render().map(Html).map_err(|e| {
        let err = Error::from(e);
        error!("Failed to render demo page: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handler for the initial page
pub async fn index_handler() -> Result<Html<String>, StatusCode> {
    render(ShellPage::default())
}

/// Handler for every widget interaction
pub async fn submit_handler(
    State(state): State<ShellState>,
    Form(form): Form<ShellForm>,
) -> Result<Html<String>, StatusCode> {
    let outcome = match form.action() {
        ShellAction::Extract => {
            info!("Extracting event from demo input");
            let result = state.extractor.extract(form.event_text()).await;
            if let Err(e) = &result {
                error!("Demo extraction failed: {}", e);
            }
            Some(result)
        }
        ShellAction::Click | ShellAction::Update => None,
    };

    render(ShellPage::from_form(&form, outcome))
}

// Handler for health check
pub async fn health_handler() -> &'static str {
    "OK"
}
