use super::{prompts, views, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

pub fn run_list(session: &Session, summary_only: bool, output: &Output) -> Result<()> {
    let watched = session.watched()?;
    let summary = watched.summary();

    if !output.is_human() {
        if summary_only {
            output.json(&json!({ "summary": summary }));
        } else {
            output.json(&json!({ "summary": summary, "movies": watched.movies() }));
        }
        return Ok(());
    }

    output.table(&views::summary_table(&summary));
    if !summary_only {
        if watched.is_empty() {
            output.info("Nothing watched yet. Rate a title with 'popcorn rate <id>'.");
        } else {
            output.table(&views::watched_table(watched.movies()));
        }
    }
    Ok(())
}

pub fn run_remove(session: &Session, id: &str, output: &Output) -> Result<()> {
    let mut watched = session.watched()?;
    let title = watched.get(id).map(|m| m.title.clone());

    let removed = watched
        .remove(id)
        .map_err(|e| eyre!("Failed to remove {} from watched list: {}", id, e))?;

    match (removed, title) {
        (true, Some(title)) => output.success(format!("Removed '{}' from your watched list", title)),
        _ => output.warn(format!("{} is not on your watched list", id)),
    }
    Ok(())
}

pub fn run_clear(session: &Session, yes: bool, output: &Output) -> Result<()> {
    let mut watched = session.watched()?;
    if watched.is_empty() {
        output.info("Watched list is already empty");
        return Ok(());
    }

    let confirmed = yes
        || prompts::prompt_yes_no(
            &format!("Remove all {} titles from your watched list?", watched.len()),
            false,
        )?;
    if !confirmed {
        output.info("Nothing removed");
        return Ok(());
    }

    let count = watched.len();
    watched
        .clear()
        .map_err(|e| eyre!("Failed to clear watched list: {}", e))?;
    output.success(format!("Removed {} titles from your watched list", count));
    Ok(())
}
