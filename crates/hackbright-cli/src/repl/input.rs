use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// One read from the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    /// Ctrl-C: drop the current line and prompt again.
    Interrupted,
    /// Ctrl-D or end of piped input.
    Eof,
}

/// Somewhere the REPL can read lines from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Line>;
}

/// Terminal input with line editing and persistent history.
pub struct LineEditor {
    editor: DefaultEditor,
    history_file: PathBuf,
}

impl std::fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("history_file", &self.history_file)
            .finish_non_exhaustive()
    }
}

impl LineEditor {
    pub fn new(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if history_file.exists() {
            if let Err(e) = editor.load_history(&history_file) {
                log::warn!("Failed to load history {}: {}", history_file.display(), e);
            }
        }
        Ok(Self {
            editor,
            history_file,
        })
    }

    /// Write the history back to disk.
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(parent) = self.history_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.editor.save_history(&self.history_file)?;
        Ok(())
    }
}

impl LineSource for LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Line> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Line::Text(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
            Err(ReadlineError::Eof) => Ok(Line::Eof),
            Err(e) => Err(e.into()),
        }
    }
}
