//! Line-oriented console command dispatcher.
//!
//! Commands are closures registered up front with a declared arity, looked
//! up by a normalized name (first letter uppercase, remainder lowercase).
//! The loop reads a line, splits it on single spaces, echoes the argument
//! tokens, and dispatches the first token. `exit` (any casing) or EOF
//! terminates the loop.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::utils::constants::{EXIT_KEYWORD, PROMPT};

#[derive(Error, Debug)]
pub enum CommanderError {
    #[error("invalid command name '{0}': must be non-empty with no whitespace")]
    InvalidName(String),

    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CommanderError>;

/// Outcome of dispatching a single input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The loop should terminate.
    Exit,
    /// Blank input; nothing to do.
    Empty,
    /// First token did not match a registered command. The loop stays
    /// silent on these.
    Unknown(String),
    /// Handler ran; `Some` carries its output line.
    Invoked(Option<String>),
    /// Argument count did not match the declared arity; the handler was
    /// not invoked.
    ArityMismatch { expected: usize, supplied: usize },
    /// The handler itself reported an error. The loop reports it and
    /// keeps running.
    Failed(String),
}

type Handler = Box<dyn FnMut(&[String]) -> std::result::Result<Option<String>, String>>;

struct Command {
    arity: usize,
    handler: Handler,
}

pub struct Commander {
    commands: HashMap<String, Command>,
}

impl Commander {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a handler under a name. Matching is case-insensitive.
    /// Registering a name again replaces the previous handler.
    pub fn register<F>(&mut self, name: &str, arity: usize, handler: F) -> Result<()>
    where
        F: FnMut(&[String]) -> std::result::Result<Option<String>, String> + 'static,
    {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(CommanderError::InvalidName(name.to_string()));
        }

        self.commands.insert(
            normalize(name),
            Command {
                arity,
                handler: Box::new(handler),
            },
        );
        Ok(())
    }

    /// Registered command names, normalized and sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// Dispatch one input line without running the loop.
    pub fn dispatch(&mut self, line: &str) -> Dispatch {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.eq_ignore_ascii_case(EXIT_KEYWORD) {
            return Dispatch::Exit;
        }
        if line.is_empty() {
            return Dispatch::Empty;
        }

        // Split on single spaces; consecutive spaces yield empty arguments,
        // the same as the original line protocol.
        let mut tokens = line.split(' ');
        let name = normalize(tokens.next().unwrap_or_default());
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let command = match self.commands.get_mut(&name) {
            Some(command) => command,
            None => return Dispatch::Unknown(name),
        };

        if command.arity != args.len() {
            return Dispatch::ArityMismatch {
                expected: command.arity,
                supplied: args.len(),
            };
        }

        match (command.handler)(&args) {
            Ok(output) => Dispatch::Invoked(output),
            Err(message) => Dispatch::Failed(message),
        }
    }

    /// Blocking read-eval loop over stdin/stdout.
    pub fn start(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), stdout.lock())
    }

    /// Read-eval loop over arbitrary streams.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(()); // EOF behaves like exit
            }

            let line = line.trim_end_matches(['\r', '\n']);
            match self.dispatch(line) {
                Dispatch::Exit => return Ok(()),
                Dispatch::Empty => continue,
                outcome => {
                    // Echo the argument tokens, one per line, before any result
                    for arg in line.split(' ').skip(1) {
                        writeln!(output, "{}", arg)?;
                    }
                    match outcome {
                        Dispatch::Invoked(Some(text)) => writeln!(output, "{}", text)?,
                        Dispatch::Invoked(None) | Dispatch::Unknown(_) => {}
                        Dispatch::ArityMismatch { .. } => {
                            writeln!(output, "Invalid number of params")?
                        }
                        Dispatch::Failed(message) => {
                            writeln!(output, "command failed: {}", message)?
                        }
                        Dispatch::Exit | Dispatch::Empty => unreachable!(),
                    }
                }
            }
        }
    }
}

impl Default for Commander {
    fn default() -> Self {
        Self::new()
    }
}

/// First letter uppercase, remainder lowercase.
fn normalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            let mut name: String = first.to_uppercase().collect();
            name.push_str(&chars.as_str().to_lowercase());
            name
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    fn recording_commander() -> (Commander, Rc<RefCell<Vec<Vec<String>>>>) {
        let calls: Rc<RefCell<Vec<Vec<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let seen = calls.clone();

        let mut commander = Commander::new();
        commander
            .register("run", 2, move |args| {
                seen.borrow_mut().push(args.to_vec());
                Ok(None)
            })
            .unwrap();

        (commander, calls)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("run"), "Run");
        assert_eq!(normalize("RUN"), "Run");
        assert_eq!(normalize("rUn"), "Run");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_register_rejects_whitespace_names() {
        let mut commander = Commander::new();
        let result = commander.register("two words", 0, |_| Ok(None));
        assert!(matches!(result, Err(CommanderError::InvalidName(_))));

        let result = commander.register("", 0, |_| Ok(None));
        assert!(matches!(result, Err(CommanderError::InvalidName(_))));
    }

    #[test]
    fn test_dispatch_passes_positional_args() {
        let (mut commander, calls) = recording_commander();

        let outcome = commander.dispatch("run 1 2");
        assert_eq!(outcome, Dispatch::Invoked(None));
        assert_eq!(
            *calls.borrow(),
            vec![vec!["1".to_string(), "2".to_string()]]
        );
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        let (mut commander, calls) = recording_commander();

        assert_eq!(commander.dispatch("RUN a b"), Dispatch::Invoked(None));
        assert_eq!(commander.dispatch("rUn c d"), Dispatch::Invoked(None));
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_arity_mismatch_skips_the_handler() {
        let (mut commander, calls) = recording_commander();

        let outcome = commander.dispatch("run 1");
        assert_eq!(
            outcome,
            Dispatch::ArityMismatch {
                expected: 2,
                supplied: 1
            }
        );
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let (mut commander, calls) = recording_commander();

        let outcome = commander.dispatch("unknown 1 2");
        assert_eq!(outcome, Dispatch::Unknown("Unknown".to_string()));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_exit_and_blank_lines() {
        let (mut commander, _) = recording_commander();

        assert_eq!(commander.dispatch("exit"), Dispatch::Exit);
        assert_eq!(commander.dispatch("EXIT"), Dispatch::Exit);
        assert_eq!(commander.dispatch(""), Dispatch::Empty);
    }

    #[test]
    fn test_reregistration_replaces_the_handler() {
        let mut commander = Commander::new();
        commander.register("greet", 0, |_| Ok(Some("old".into()))).unwrap();
        commander.register("greet", 0, |_| Ok(Some("new".into()))).unwrap();

        assert_eq!(
            commander.dispatch("greet"),
            Dispatch::Invoked(Some("new".to_string()))
        );
    }

    #[test]
    fn test_handler_error_is_classified_not_fatal() {
        let mut commander = Commander::new();
        commander
            .register("fragile", 0, |_| Err("it broke".to_string()))
            .unwrap();

        assert_eq!(
            commander.dispatch("fragile"),
            Dispatch::Failed("it broke".to_string())
        );
        // The loop is still usable afterwards
        assert_eq!(commander.dispatch("exit"), Dispatch::Exit);
    }

    #[test]
    fn test_run_loop_end_to_end() {
        let (mut commander, calls) = recording_commander();

        let input = Cursor::new("run 1 2\nmystery a\nrun 1\n\nexit\n");
        let mut output = Vec::new();
        commander.run(input, &mut output).unwrap();

        let transcript = String::from_utf8(output).unwrap();
        // Arguments are echoed one per line
        assert!(transcript.contains("1\n2\n"));
        // Arity mismatch reported, handler untouched by it
        assert!(transcript.contains("Invalid number of params"));
        // Unknown command produced no message
        assert!(!transcript.contains("mystery"));
        assert_eq!(*calls.borrow(), vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn test_run_loop_reports_handler_failures_and_continues() {
        let mut commander = Commander::new();
        commander
            .register("fragile", 0, |_| Err("it broke".to_string()))
            .unwrap();
        commander
            .register("sturdy", 0, |_| Ok(Some("ok".into())))
            .unwrap();

        let input = Cursor::new("fragile\nsturdy\nexit\n");
        let mut output = Vec::new();
        commander.run(input, &mut output).unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("command failed: it broke"));
        assert!(transcript.contains("ok"));
    }

    #[test]
    fn test_run_loop_terminates_on_eof() {
        let (mut commander, _) = recording_commander();

        let input = Cursor::new("run 1 2\n");
        let mut output = Vec::new();
        // No trailing exit; EOF must end the loop rather than spin
        commander.run(input, &mut output).unwrap();
    }

    #[test]
    fn test_names_are_normalized_and_sorted() {
        let mut commander = Commander::new();
        commander.register("zeta", 0, |_| Ok(None)).unwrap();
        commander.register("ALPHA", 0, |_| Ok(None)).unwrap();

        assert_eq!(commander.names(), vec!["Alpha".to_string(), "Zeta".to_string()]);
    }
}
