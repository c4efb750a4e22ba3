//! External editor support
//!
//! Book content is markdown; rather than re-implement a text editor in the
//! terminal, the content field round-trips through the user's $EDITOR.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::process::Command;

/// Open content in the user's preferred editor and return the edited text.
pub fn edit_markdown(initial_content: &str) -> Result<String> {
    let editor = find_editor()?;

    let temp_dir = env::temp_dir();
    let temp_path = temp_dir.join(format!("litebooks_edit_{}.md", std::process::id()));

    fs::write(&temp_path, initial_content)
        .with_context(|| format!("Failed to create temp file: {:?}", temp_path))?;

    let status = Command::new(&editor)
        .arg(&temp_path)
        .status()
        .with_context(|| format!("Failed to run editor: {}", editor))?;

    if !status.success() {
        let _ = fs::remove_file(&temp_path);
        bail!("Editor exited with non-zero status");
    }

    let content = fs::read_to_string(&temp_path)
        .with_context(|| format!("Failed to read edited file: {:?}", temp_path))?;

    let _ = fs::remove_file(&temp_path);

    Ok(content)
}

/// Find the user's preferred editor
///
/// Uses $EDITOR, $VISUAL, or falls back to common editors.
fn find_editor() -> Result<String> {
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if let Ok(visual) = env::var("VISUAL") {
        if !visual.is_empty() {
            return Ok(visual);
        }
    }

    for candidate in ["nano", "vim", "vi"] {
        if Command::new("which")
            .arg(candidate)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok(candidate.to_string());
        }
    }

    bail!("No editor found. Set the EDITOR environment variable.")
}
