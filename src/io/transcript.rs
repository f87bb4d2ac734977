//! Chat transcript writer (markdown) for the TUI's Ctrl+D binding.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{AppError, EXIT_RUNTIME};
use crate::report::format::format_response;
use crate::report::response::Answer;

/// Default output directory, relative to the working directory.
pub const TRANSCRIPT_DIR: &str = "transcripts";

/// Write `history` to `<dir>/msme_chat_<timestamp>.md` and return the path.
pub fn write_transcript(dir: &Path, history: &[Answer]) -> Result<PathBuf, AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to create transcript dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("msme_chat_{ts}.md"));
    let mut file = File::create(&path)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to create transcript file: {e}")))?;

    file.write_all(render_transcript(history).as_bytes())
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to write transcript: {e}")))?;

    Ok(path)
}

/// Markdown body: one section per question, answer in a text block.
pub fn render_transcript(history: &[Answer]) -> String {
    let mut out = String::new();
    out.push_str("# msme chat transcript\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));
    out.push_str(&format!("- questions: {}\n", history.len()));

    for (i, a) in history.iter().enumerate() {
        out.push_str(&format!("\n## {}. {}\n", i + 1, a.query));
        out.push_str(&format!("- intent: {:?}\n\n", a.intent));
        out.push_str("```text\n");
        out.push_str(&format_response(&a.response));
        out.push_str("```\n");
    }
    out
}
