use super::{prompts, Session};
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use popcorn_config::{Config, API_KEY_ENV};
use serde_json::json;
use std::path::PathBuf;

pub fn run_config(session: Session, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(&session, full, output),
        ConfigCommands::SetKey { key } => set_api_key(session, key, output),
        ConfigCommands::Set { key, value } => set_value(session, &key, &value, output),
    }
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[..2].iter().collect();
    format!("{}{}", visible, "*".repeat(chars.len() - 2))
}

fn show_config(session: &Session, full: bool, output: &Output) -> Result<()> {
    let config = &session.config;
    let config_file = session.paths.config_file();
    let api_key = session.credentials.resolve_omdb_api_key();
    let api_key_display = match &api_key {
        Some(key) if full => key.clone(),
        Some(key) => mask_string(key),
        None => "not set".to_string(),
    };
    let key_source = if std::env::var(API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        API_KEY_ENV.to_string()
    } else {
        session.paths.credentials_file().display().to_string()
    };

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file,
            "storage_file": session.paths.storage_file(),
            "omdb": {
                "base_url": config.omdb.base_url,
                "timeout_secs": config.omdb.timeout_secs,
                "api_key": api_key_display,
                "api_key_source": api_key.as_ref().map(|_| key_source),
            },
            "search": { "min_query_length": config.search.min_query_length },
            "storage": { "watched_key": config.storage.watched_key },
            "geolocation": {
                "enabled": config.geolocation.enabled,
                "endpoint": config.geolocation.endpoint,
            },
            "logging": { "file": config.logging.file },
        }));
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    if !config_file.exists() {
        println!("{}", "(no config file yet, showing defaults)".bright_black());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config file"), Cell::new(config_file.display())]);
    table.add_row(vec![Cell::new("Storage file"), Cell::new(session.paths.storage_file().display())]);
    table.add_row(vec![Cell::new("omdb.base_url"), Cell::new(&config.omdb.base_url)]);
    table.add_row(vec![Cell::new("omdb.timeout_secs"), Cell::new(config.omdb.timeout_secs)]);
    table.add_row(vec![
        Cell::new("OMDb API key"),
        Cell::new(match api_key {
            Some(_) => format!("{} (from {})", api_key_display, key_source),
            None => api_key_display.red().to_string(),
        }),
    ]);
    table.add_row(vec![Cell::new("search.min_query_length"), Cell::new(config.search.min_query_length)]);
    table.add_row(vec![Cell::new("storage.watched_key"), Cell::new(&config.storage.watched_key)]);
    table.add_row(vec![
        Cell::new("geolocation.enabled"),
        Cell::new(if config.geolocation.enabled { "✓".green().to_string() } else { "✗".red().to_string() }),
    ]);
    table.add_row(vec![Cell::new("geolocation.endpoint"), Cell::new(&config.geolocation.endpoint)]);
    table.add_row(vec![
        Cell::new("logging.file"),
        Cell::new(
            config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ]);
    println!("{}", table);
    Ok(())
}

fn set_api_key(mut session: Session, key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => prompts::prompt_password("OMDb API key")?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    session.credentials.set_omdb_api_key(key);
    session.credentials.save().map_err(|e| {
        eyre!(
            "Failed to save credentials to {}: {}",
            session.paths.credentials_file().display(),
            e
        )
    })?;
    output.success(format!(
        "OMDb API key saved to {}",
        session.paths.credentials_file().display()
    ));
    Ok(())
}

/// Apply `key = value` to `config`
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parse_err = |e: &dyn std::fmt::Display| eyre!("Invalid value '{}' for {}: {}", value, key, e);
    match key {
        "omdb.base_url" => config.omdb.base_url = value.to_string(),
        "omdb.timeout_secs" => config.omdb.timeout_secs = value.parse::<u64>().map_err(|e| parse_err(&e))?,
        "search.min_query_length" => {
            config.search.min_query_length = value.parse::<usize>().map_err(|e| parse_err(&e))?
        }
        "storage.watched_key" => config.storage.watched_key = value.to_string(),
        "geolocation.enabled" => config.geolocation.enabled = value.parse::<bool>().map_err(|e| parse_err(&e))?,
        "geolocation.endpoint" => config.geolocation.endpoint = value.to_string(),
        "logging.file" => {
            config.logging.file = match value {
                "" | "none" | "stderr" => None,
                path => Some(PathBuf::from(path)),
            }
        }
        _ => return Err(eyre!("Unknown setting '{}'", key)),
    }
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))
}

fn set_value(mut session: Session, key: &str, value: &str, output: &Output) -> Result<()> {
    apply_setting(&mut session.config, key, value)?;

    let config_file = session.paths.config_file();
    session
        .config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Set {} = {}", key, value));
    Ok(())
}
