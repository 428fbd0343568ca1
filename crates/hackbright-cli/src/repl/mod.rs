//! The interactive prompt: read a line, dispatch it, print the result.

pub mod command;
pub mod format;
pub mod input;
pub mod session;

use anyhow::Result;
use std::io::Write;

pub use command::CommandError;
pub use input::{Line, LineEditor, LineSource};
pub use session::{Session, SessionState};

pub const PROMPT: &str = "HBA Database> ";

/// Run one line through the session and render what it printed, success or
/// failure alike.
pub fn handle_line(session: &mut Session, line: &str) -> String {
    match session.dispatch(line) {
        Ok(outcome) => format::render(&outcome),
        Err(err) => {
            log_failure(line, &err);
            format::render_error(&err)
        }
    }
}

/// Store failures are logged at warn; input mistakes and empty lookups at
/// debug.
pub fn log_failure(line: &str, err: &CommandError) {
    match err {
        CommandError::Store(e) => log::warn!("Command {:?} failed: {}", line.trim(), e),
        _ => log::debug!("Command {:?} rejected: {}", line.trim(), err),
    }
}

/// Prompt for commands until `quit` or end of input.
///
/// Per-command failures are printed and the loop keeps going; only errors
/// reading input or writing output end it early.
pub fn run_repl(
    session: &mut Session,
    input: &mut impl LineSource,
    output: &mut impl Write,
) -> Result<()> {
    while session.state() == SessionState::Running {
        let line = match input.read_line(PROMPT)? {
            Line::Text(line) => line,
            Line::Interrupted => continue,
            Line::Eof => {
                log::debug!("End of input, leaving prompt");
                session.terminate();
                break;
            }
        };

        let text = handle_line(session, &line);
        if !text.is_empty() {
            writeln!(output, "{}", text)?;
        }
        output.flush()?;
    }
    Ok(())
}
