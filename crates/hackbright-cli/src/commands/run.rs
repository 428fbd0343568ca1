use anyhow::Result;
use std::path::Path;

use crate::repl::{self, format, Session};

/// Run a single prompt command without entering the loop. A failed command
/// is printed like at the prompt and then returned as an error, so the
/// process exits non-zero.
pub fn run_once(db_path: &Path, words: &[String]) -> Result<()> {
    let db = super::connect(db_path)?;
    let mut session = Session::new(db);
    let line = words.join(" ");

    let result = session.dispatch(&line);
    match &result {
        Ok(outcome) => {
            let text = format::render(outcome);
            if !text.is_empty() {
                println!("{}", text);
            }
        }
        Err(err) => {
            repl::log_failure(&line, err);
            println!("{}", format::render_error(err));
        }
    }

    session.close()?;
    result.map(|_| ()).map_err(|err| {
        anyhow::Error::new(err).context(format!("Command '{}' failed", line))
    })
}
