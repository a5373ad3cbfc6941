use super::{ui::Spinner, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::Geolocation;
use popcorn_sources::{build_locator, PositionProvider};
use serde_json::json;
use std::sync::Arc;

pub async fn run_locate(session: &Session, times: u32, output: &Output) -> Result<()> {
    let provider = build_locator(&session.config)
        .map_err(|e| eyre!("Failed to set up geolocation: {}", e))?
        .map(|locator| Arc::new(locator) as Arc<dyn PositionProvider>);
    let geolocation = Geolocation::new(provider);

    for _ in 0..times.max(1) {
        let spinner = Spinner::start("Getting your position...");
        let state = geolocation.get_position().await;
        spinner.finish();

        if !output.is_human() {
            output.json(&json!({
                "request": geolocation.request_count(),
                "position": state.position,
                "map_url": state.position.map(|p| p.map_url()),
                "error": state.error,
            }));
            continue;
        }

        match (state.error, state.position) {
            (Some(error), _) => output.error(error),
            (None, Some(position)) => output.success(format!(
                "Your position: {}, {} ({})",
                position.latitude,
                position.longitude,
                position.map_url()
            )),
            (None, None) => output.warn("No position available"),
        }
    }

    output.info(format!("Requests made: {}", geolocation.request_count()));
    Ok(())
}
