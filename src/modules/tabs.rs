// Host tab registry - the boundary the capture core queries.
// The UI shell owns the real tab list and reports snapshots here.

use std::collections::HashSet;

use tauri::{AppHandle, Emitter, State};

use crate::state::{AppState, Tab};

/// Pure merge of a UI-reported snapshot into the registry.
/// Returns true if the registry changed.
///
/// Duplicated ids keep their first occurrence (a glitching UI must not
/// inflate a capture); order is otherwise preserved as reported.
pub fn apply_snapshot(tabs: &mut Vec<Tab>, incoming: Vec<Tab>) -> bool {
    let mut seen = HashSet::new();
    let deduped: Vec<Tab> = incoming
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect();

    if *tabs == deduped {
        return false;
    }
    *tabs = deduped;
    true
}

/// Tauri command: the UI reports its current tab set.
#[tauri::command]
pub fn sync_tabs(
    app: AppHandle,
    state: State<AppState>,
    tabs: Vec<Tab>,
    active_tab_id: Option<String>,
) -> Result<(), String> {
    let changed = {
        let mut current = state.tabs.lock().map_err(|e| e.to_string())?;
        apply_snapshot(&mut current, tabs)
    };

    let active_changed = {
        let mut active = state.active_tab_id.lock().map_err(|e| e.to_string())?;
        let differs = *active != active_tab_id;
        *active = active_tab_id;
        differs
    };

    if changed || active_changed {
        let tabs = state.tabs.lock().map_err(|e| e.to_string())?;
        let active_id = state.active_tab_id.lock().map_err(|e| e.to_string())?.clone();
        let _ = app.emit(
            "update-tabs",
            serde_json::json!({
                "tabs": *tabs,
                "activeTabId": active_id
            }),
        );
    }

    Ok(())
}

/// Tauri command: current registry contents, for the popup list.
#[tauri::command]
pub fn get_tabs(state: State<AppState>) -> Result<serde_json::Value, String> {
    let tabs = state.tabs.lock().map_err(|e| e.to_string())?;
    let active_id = state.active_tab_id.lock().map_err(|e| e.to_string())?.clone();
    Ok(serde_json::json!({
        "tabs": *tabs,
        "activeTabId": active_id
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: &str, url: &str) -> Tab {
        Tab {
            id: id.to_string(),
            title: format!("Tab {}", id),
            url: url.to_string(),
            favicon: None,
        }
    }

    #[test]
    fn test_snapshot_replaces_in_order() {
        let mut tabs = vec![tab("1", "https://a.example")];
        let changed = apply_snapshot(
            &mut tabs,
            vec![tab("2", "https://b.example"), tab("3", "https://c.example")],
        );

        assert!(changed);
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].id, "2");
        assert_eq!(tabs[1].id, "3");
    }

    #[test]
    fn test_identical_snapshot_is_no_change() {
        let mut tabs = vec![tab("1", "https://a.example"), tab("2", "https://b.example")];
        let same = tabs.clone();
        assert!(!apply_snapshot(&mut tabs, same));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut tabs = Vec::new();
        let changed = apply_snapshot(
            &mut tabs,
            vec![
                tab("1", "https://first.example"),
                tab("1", "https://dupe.example"),
                tab("2", "https://b.example"),
            ],
        );

        assert!(changed);
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].url, "https://first.example");
    }
}
