use dialoguer::{theme::ColorfulTheme, Confirm};

/// Check if we're in an interactive terminal
pub fn is_interactive() -> bool {
    use std::env;

    // Not interactive if stdin/stdout is not a TTY, or CI /
    // TOOLBELT_NO_INTERACT is set

    if env::var("CI").is_ok() {
        return false;
    }

    if env::var("TOOLBELT_NO_INTERACT").is_ok() {
        return false;
    }

    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}

/// Confirm an action with the user; falls back to `default` when not
/// interactive
pub fn confirm_action(prompt: &str, default: bool) -> Result<bool, String> {
    if !is_interactive() {
        return Ok(default);
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| format!("Failed to get confirmation: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_interactive_checks_env() {
        std::env::set_var("CI", "true");
        assert!(!is_interactive());
        std::env::remove_var("CI");

        std::env::set_var("TOOLBELT_NO_INTERACT", "1");
        assert!(!is_interactive());
        std::env::remove_var("TOOLBELT_NO_INTERACT");
    }

    #[test]
    fn test_confirm_falls_back_to_default_when_not_interactive() {
        std::env::set_var("TOOLBELT_NO_INTERACT", "1");
        assert_eq!(confirm_action("proceed?", true), Ok(true));
        assert_eq!(confirm_action("proceed?", false), Ok(false));
        std::env::remove_var("TOOLBELT_NO_INTERACT");
    }
}
