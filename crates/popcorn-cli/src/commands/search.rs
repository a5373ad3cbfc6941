use super::{ui::Spinner, views, Session};
use crate::output::Output;
use color_eyre::Result;
use popcorn_core::SearchFetcher;
use serde_json::json;

pub async fn run_search(session: &Session, query: &str, output: &Output) -> Result<()> {
    let min_len = session.config.search.min_query_length;
    if query.trim().chars().count() < min_len {
        output.warn(format!("Type at least {} characters to search", min_len));
        return Ok(());
    }

    let watched = session.watched()?;
    let mut search = SearchFetcher::new(session.catalog()?, min_len);

    let spinner = Spinner::start(format!("Searching for '{}'...", query.trim()));
    search.set_query(query);
    let state = search.settled().await;
    spinner.finish();

    if !output.is_human() {
        output.json(&json!({
            "query": query.trim(),
            "results": state.items,
            "error": state.error,
        }));
        return Ok(());
    }

    if let Some(error) = &state.error {
        output.error(error);
        return Ok(());
    }

    output.info(format!("Found {} results", state.items.len()));
    output.table(&views::results_table(&state.items, None, |id| watched.contains(id)));
    Ok(())
}
