// Console presentation for the CLI binary.
// Verbosity and color come from the environment: TOOLBELT_QUIET suppresses
// chatter, TOOLBELT_DEBUG/TOOLBELT_VERBOSE enable debug lines, NO_COLOR or
// a non-TTY stdout disables ANSI codes.

use std::env;

/// ANSI color codes for console output
pub struct Colors;

impl Colors {
    /// Success - #50C878
    pub const SUCCESS: &'static str = "\x1b[38;2;80;200;120m";
    /// Info/progress - #56B6C2
    pub const INFO: &'static str = "\x1b[38;2;86;182;194m";
    /// Technical details - #808080
    pub const DIM: &'static str = "\x1b[38;2;128;128;128m";
    /// Errors - #E05146
    pub const ERROR: &'static str = "\x1b[38;2;224;81;70m";
    /// Warnings - #F0AD4E
    pub const WARNING: &'static str = "\x1b[38;2;240;173;78m";
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
}

/// Unicode symbols for different message types
pub struct Symbols;

impl Symbols {
    pub const SUCCESS: &'static str = "✓";
    pub const ERROR: &'static str = "✗";
    pub const WARNING: &'static str = "!";
    pub const INFO: &'static str = "ℹ";
    pub const ARROW: &'static str = "→";
    pub const BULLET: &'static str = "•";
}

/// Leveled console writer with clean, symbol-prefixed output
pub struct Console;

impl Console {
    /// Log a success message (green checkmark); hidden in quiet mode
    pub fn success(message: &str) {
        if is_quiet_mode() {
            return;
        }
        println!("{}", paint(Colors::SUCCESS, Symbols::SUCCESS, message));
    }

    /// Log an error message (red X) to stderr; never suppressed
    pub fn error(message: &str) {
        eprintln!("{}", paint(Colors::ERROR, Symbols::ERROR, message));
    }

    /// Log a warning message (amber exclamation)
    pub fn warning(message: &str) {
        println!("{}", paint(Colors::WARNING, Symbols::WARNING, message));
    }

    /// Log an info message (cyan info icon); hidden in quiet mode
    pub fn info(message: &str) {
        if is_quiet_mode() {
            return;
        }
        println!("{}", paint(Colors::INFO, Symbols::INFO, message));
    }

    /// Log a debug message (only shown if TOOLBELT_DEBUG or TOOLBELT_VERBOSE is set)
    pub fn debug(message: &str) {
        if is_verbose_mode() {
            println!("{}", paint(Colors::DIM, Symbols::BULLET, message));
        }
    }

    /// Display a key-value detail line (indented, dimmed label)
    /// Example: "  min → 3 at index 1"
    pub fn detail(label: &str, value: &str) {
        if is_quiet_mode() {
            return;
        }
        if should_use_colors() {
            println!(
                "  {}{}{} {} {}{}{}",
                Colors::DIM,
                label,
                Colors::RESET,
                Symbols::ARROW,
                Colors::INFO,
                value,
                Colors::RESET
            );
        } else {
            println!("  {} {} {}", label, Symbols::ARROW, value);
        }
    }

    /// Display a section header (bold)
    pub fn section(title: &str) {
        if is_quiet_mode() {
            return;
        }
        if should_use_colors() {
            println!("\n{}{}{}", Colors::BOLD, title, Colors::RESET);
        } else {
            println!("\n{}", title);
        }
    }

    /// Display an error with a suggestion on the following line
    pub fn error_with_hint(error: &str, hint: &str) {
        eprintln!("{}", paint(Colors::ERROR, Symbols::ERROR, error));
        eprintln!("  {}", paint(Colors::DIM, Symbols::ARROW, hint));
    }
}

fn paint(color: &str, symbol: &str, message: &str) -> String {
    if should_use_colors() {
        format!("{}{} {}{}", color, symbol, message, Colors::RESET)
    } else {
        format!("{} {}", symbol, message)
    }
}

/// Check if we should suppress non-error output (for --quiet mode)
pub fn is_quiet_mode() -> bool {
    env::var("TOOLBELT_QUIET").is_ok()
}

/// Check if we should show debug output
pub fn is_verbose_mode() -> bool {
    env::var("TOOLBELT_VERBOSE").is_ok() || env::var("TOOLBELT_DEBUG").is_ok()
}

/// Check if colors should be disabled
pub fn should_use_colors() -> bool {
    // Disable colors if NO_COLOR is set or if not a TTY
    env::var("NO_COLOR").is_err() && console::Term::stdout().is_term()
}
