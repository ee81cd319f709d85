use anyhow::Result;
use dialoguer::Confirm;

/// Ask before running destructive statements. Defaults to "no".
pub fn confirm_destructive(prompt: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}
