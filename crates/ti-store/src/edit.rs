//! Hand-editing the sheet through an external editor.
//!
//! The sheet is rendered as YAML into a temporary file, the editor runs to
//! completion, and the edited text is parsed back. The sheet on disk is only
//! replaced once the edited text parses into a valid log.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use ti_core::{Store, WorkLog};

use crate::{SheetDocument, SheetStore, StoreError};

/// Picks the editor: the configured one first, then the `EDITOR` value.
///
/// Blank values are ignored.
pub fn resolve_editor(
    configured: Option<&str>,
    env_editor: Option<&str>,
) -> Result<String, StoreError> {
    configured
        .into_iter()
        .chain(env_editor)
        .map(str::trim)
        .find(|editor| !editor.is_empty())
        .map(ToString::to_string)
        .ok_or(StoreError::NoEditor)
}

/// Renders a document as YAML, with a blank line between top-level entries.
pub fn to_editable(document: &SheetDocument) -> Result<String, StoreError> {
    let yaml =
        serde_yaml::to_string(document).map_err(|err| StoreError::Serialize(err.to_string()))?;
    Ok(yaml.replace("\n- ", "\n\n- "))
}

/// Parses edited YAML back into a log.
pub fn from_editable(text: &str) -> Result<WorkLog, StoreError> {
    let document: SheetDocument =
        serde_yaml::from_str(text).map_err(|err| StoreError::InvalidDocument(err.to_string()))?;
    document.into_log()
}

/// Opens the sheet in `editor` and saves the result.
///
/// `editor` may carry arguments (`code --wait`); the temporary file path is
/// appended as the last argument. Returns the saved log.
pub fn edit_sheet(store: &SheetStore, editor: &str) -> Result<WorkLog, StoreError> {
    let document = store.load_document()?;
    let text = to_editable(&document)?;

    let mut file = tempfile::Builder::new()
        .prefix("ti.")
        .suffix(".yml")
        .tempfile()
        .map_err(StoreError::TempFile)?;
    file.write_all(text.as_bytes())
        .map_err(StoreError::TempFile)?;
    file.flush().map_err(StoreError::TempFile)?;

    run_editor(editor, file.path())?;

    let edited = fs::read_to_string(file.path()).map_err(StoreError::TempFile)?;
    let log = from_editable(&edited)?;
    store.dump(&log)?;

    tracing::info!(
        path = %store.path().display(),
        entries = log.entries().len(),
        "sheet replaced from editor"
    );
    Ok(log)
}

fn run_editor(editor: &str, path: &Path) -> Result<(), StoreError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(StoreError::NoEditor)?;

    tracing::debug!(editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|err| StoreError::Editor {
            editor: editor.to_string(),
            reason: err.to_string(),
        })?;

    if !status.success() {
        tracing::warn!(editor, %status, "editor exited unsuccessfully");
        return Err(StoreError::Editor {
            editor: editor.to_string(),
            reason: format!("exited with {status}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, minute, 0).unwrap()
    }

    fn store_with_alpha(dir: &Path) -> SheetStore {
        let store = SheetStore::new(dir.join("sheet.json"));
        let mut log = WorkLog::new();
        log.start_work("alpha", at(9, 0)).unwrap();
        log.end_work(at(10, 0)).unwrap();
        log.start_work("gamma", at(10, 0)).unwrap();
        log.add_note("multi\nline note").unwrap();
        store.dump(&log).unwrap();
        store
    }

    #[test]
    fn resolve_prefers_configured_editor() {
        assert_eq!(resolve_editor(Some("vim"), Some("nano")).unwrap(), "vim");
        assert_eq!(resolve_editor(None, Some("nano")).unwrap(), "nano");
        assert_eq!(resolve_editor(Some("  "), Some("nano")).unwrap(), "nano");
    }

    #[test]
    fn resolve_without_editor_is_no_editor() {
        assert!(matches!(
            resolve_editor(None, None),
            Err(StoreError::NoEditor)
        ));
        assert!(matches!(
            resolve_editor(Some(""), Some(" ")),
            Err(StoreError::NoEditor)
        ));
    }

    #[test]
    fn editable_text_round_trips() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_with_alpha(temp.path());
        let document = store.load_document().unwrap();

        let text = to_editable(&document).unwrap();
        assert!(text.contains("\n\n- "));

        let log = from_editable(&text).unwrap();
        assert_eq!(log, document.into_log().unwrap());
    }

    #[test]
    fn garbage_text_is_invalid_document() {
        let err = from_editable("work: [unterminated").unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument(_)), "got {err:?}");
    }

    #[test]
    fn wrong_shape_is_invalid_document() {
        let err = from_editable("work:\n- name: a\n").unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument(_)), "got {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn unchanged_edit_keeps_sheet() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_with_alpha(temp.path());
        let before = store.load().unwrap();

        let after = edit_sheet(&store, "true").unwrap();

        assert_eq!(after, before);
        assert_eq!(store.load().unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn edits_are_saved() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_with_alpha(temp.path());

        edit_sheet(&store, "sed -i s/alpha/beta/").unwrap();

        let log = store.load().unwrap();
        assert_eq!(log.entries()[0].name, "beta");
        assert_eq!(log.current().unwrap().name, "gamma");
    }

    #[cfg(unix)]
    #[test]
    fn invalid_edit_leaves_sheet_untouched() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_with_alpha(temp.path());
        let original = fs::read_to_string(store.path()).unwrap();

        let garbage = temp.path().join("garbage.yml");
        fs::write(&garbage, "work: [not: valid: yaml").unwrap();
        let editor = format!("cp {}", garbage.display());

        let err = edit_sheet(&store, &editor).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument(_)), "got {err:?}");
        assert_eq!(fs::read_to_string(store.path()).unwrap(), original);
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_leaves_sheet_untouched() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_with_alpha(temp.path());
        let original = fs::read_to_string(store.path()).unwrap();

        let err = edit_sheet(&store, "false").unwrap_err();
        assert!(matches!(err, StoreError::Editor { .. }), "got {err:?}");
        assert_eq!(fs::read_to_string(store.path()).unwrap(), original);
    }

    #[test]
    fn missing_editor_binary_is_editor_error() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_with_alpha(temp.path());

        let err = edit_sheet(&store, "ti-test-no-such-editor-binary").unwrap_err();
        assert!(matches!(err, StoreError::Editor { .. }), "got {err:?}");
    }
}
