//! The `memoraid validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(journal_path: PathBuf) -> Result<()> {
    let journals = if journal_path.is_dir() {
        memoraid_core::journal::load_journal_directory(&journal_path)?
    } else {
        vec![memoraid_core::journal::parse_journal(&journal_path)?]
    };

    let mut total_warnings = 0;

    for journal in &journals {
        println!("Journal: {} ({} memories)", journal.name, journal.memories.len());

        let warnings = memoraid_core::journal::validate_journal(journal);
        for w in &warnings {
            let prefix = w
                .memory_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All journals valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
