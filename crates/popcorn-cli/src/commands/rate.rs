use super::{prompts, ui::Spinner, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::{AddOutcome, Intent};
use serde_json::json;

pub async fn run_rate(session: &Session, id: &str, rating: Option<u8>, output: &Output) -> Result<()> {
    let mut app = session.app()?;

    let spinner = Spinner::start(format!("Loading {}...", id));
    app.dispatch(Intent::Select(id.to_string()))?;
    let state = app.detail().settled().await;
    spinner.finish();

    let record = match (state.record, state.error) {
        (Some(record), _) => record,
        (_, error) => {
            return Err(eyre!(
                "Failed to load {}: {}",
                id,
                error.unwrap_or_else(|| "no record".to_string())
            ))
        }
    };

    let value = match rating {
        Some(value) => value,
        None => prompts::prompt_rating(&format!("Rate '{}' (1-10)", record.title), output)?.value(),
    };
    app.dispatch(Intent::Rate(value))?;
    app.dispatch(Intent::AddWatched)?;

    let verb = match app.last_added() {
        Some(AddOutcome::Replaced) => "Updated",
        _ => "Added",
    };
    if output.is_human() {
        output.success(format!("{} '{}' with your rating {}/10", verb, record.title, value));
    } else {
        output.json(&json!({
            "imdb_id": record.imdb_id,
            "title": record.title,
            "user_rating": value,
            "outcome": verb.to_lowercase(),
            "summary": app.summary(),
        }));
    }
    Ok(())
}
