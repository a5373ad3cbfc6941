use super::{ui::Spinner, views, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::DetailFetcher;
use serde_json::json;

pub async fn run_show(session: &Session, id: &str, output: &Output) -> Result<()> {
    let watched = session.watched()?;
    let mut detail = DetailFetcher::new(session.catalog()?);

    let spinner = Spinner::start(format!("Loading {}...", id));
    detail.set_id(Some(id));
    let state = detail.settled().await;
    spinner.finish();

    let record = match (state.record, state.error) {
        (Some(record), _) => record,
        (None, Some(error)) => return Err(eyre!("Failed to load {}: {}", id, error)),
        (None, None) => return Err(eyre!("No title id given")),
    };

    let rated = watched.user_rating_for(&record.imdb_id);
    if output.is_human() {
        output.table(&views::detail_table(&record, rated, None));
    } else {
        output.json(&json!({
            "detail": record,
            "user_rating": rated,
        }));
    }
    Ok(())
}
