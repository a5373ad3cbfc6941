use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Password};
use popcorn_models::UserRating;

/// Read one line; empty input is allowed
pub fn prompt_line(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Ask for a 1-10 rating until a valid one is entered
pub fn prompt_rating(prompt: &str, output: &Output) -> Result<UserRating> {
    loop {
        let input = Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        match input.trim().parse::<u8>().ok().and_then(UserRating::new) {
            Some(rating) => return Ok(rating),
            None => output.error(format!(
                "Invalid rating. Please enter a number from {} to {}.",
                UserRating::MIN,
                UserRating::MAX
            )),
        }
    }
}
