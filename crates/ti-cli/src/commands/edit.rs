//! Edit command: hand-edit the raw sheet in an external editor.

use std::io::Write;

use anyhow::{Context, Result};
use ti_store::SheetStore;
use ti_store::edit::{edit_sheet, resolve_editor};

use crate::Config;

/// Opens the sheet in the configured editor, falling back to `env_editor`.
pub fn run<W: Write>(
    writer: &mut W,
    store: &SheetStore,
    config: &Config,
    env_editor: Option<&str>,
) -> Result<()> {
    let editor = resolve_editor(config.editor.as_deref(), env_editor)?;
    let log = edit_sheet(store, &editor)
        .with_context(|| format!("failed to edit {}", store.path().display()))?;

    writeln!(
        writer,
        "Sheet saved with {} entries and {} pending interrupts.",
        log.entries().len(),
        log.depth()
    )?;
    Ok(())
}
