// Capture flow - one user trigger end to end.
// Resolves the destination category, snapshots the targeted tabs, builds
// the envelope, dispatches it, and reports the outcome. Serves both the
// popup buttons and the menu accelerators through the same core.

use tauri::AppHandle;

use crate::bridge::{CaptureScope, HostBridge, TauriBridge};
use crate::error::CaptureError;
use crate::modules::categories::load_categories;
use crate::modules::dispatch::{dispatch, DeliveryChannel};
use crate::modules::envelope::{build_envelope, Category};
use crate::modules::snapshot::build_records;
use crate::modules::status::{report, StatusKind};
use crate::settings::Settings;

#[derive(Debug)]
pub struct CaptureOutcome {
    pub tab_count: usize,
    pub channel: DeliveryChannel,
    pub category_id: String,
}

/// Pick the destination category.
///
/// An explicit selection must still exist in the loaded set; a stale id
/// aborts rather than exporting records with a dangling reference. With
/// no selection (quick capture), the remembered last-used category wins
/// when still present, else the first category.
pub fn resolve_category<'a>(
    categories: &'a [Category],
    selected: Option<&str>,
    remembered: Option<&str>,
) -> Result<&'a Category, CaptureError> {
    if let Some(id) = selected {
        return categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(CaptureError::NoCategory);
    }
    if let Some(id) = remembered {
        if let Some(category) = categories.iter().find(|c| c.id == id) {
            return Ok(category);
        }
    }
    categories.first().ok_or(CaptureError::NoCategory)
}

/// Run one capture against the host bridge. Sequential: every boundary
/// operation is awaited before the next state; no cancellation.
pub async fn capture_tabs(
    bridge: &dyn HostBridge,
    scope: CaptureScope,
    selected_category: Option<&str>,
    remembered_category: Option<&str>,
) -> Result<CaptureOutcome, CaptureError> {
    let categories = load_categories(bridge).await;
    let category = resolve_category(&categories, selected_category, remembered_category)?.clone();

    let tabs = bridge.query_tabs(scope).await.map_err(|e| {
        log::warn!("[Capture] Tab query failed: {}", e);
        CaptureError::NoTarget
    })?;
    if tabs.is_empty() {
        return Err(CaptureError::NoTarget);
    }

    let records = build_records(&tabs, &category.id);
    let envelope = build_envelope(records, &categories);
    let channel = dispatch(bridge, &envelope, &category.name).await?;

    log::info!(
        "[Capture] Saved {} tab(s) to '{}' via {:?}",
        tabs.len(),
        category.name,
        channel
    );
    Ok(CaptureOutcome {
        tab_count: tabs.len(),
        channel,
        category_id: category.id,
    })
}

fn user_message(err: &CaptureError, scope: CaptureScope) -> String {
    match err {
        CaptureError::NoTarget => match scope {
            CaptureScope::ActiveTab => "No active tab found".to_string(),
            CaptureScope::AllTabs => "No tabs found".to_string(),
        },
        CaptureError::NoCategory => "Please select a category".to_string(),
        CaptureError::Clipboard(_) => "Failed to copy to clipboard".to_string(),
        CaptureError::Storage(_) => "Could not load categories".to_string(),
        CaptureError::DirectHandoff(_) | CaptureError::Serialize(_) => {
            "Could not save tabs".to_string()
        }
    }
}

fn remember_category(app: &AppHandle, category_id: &str) {
    let mut settings = Settings::load(app);
    if settings.last_category_id.as_deref() == Some(category_id) {
        return;
    }
    settings.last_category_id = Some(category_id.to_string());
    if let Err(e) = settings.save(app) {
        log::warn!("[Capture] Failed to remember category: {}", e);
    }
}

/// Shared driver for the commands and the menu accelerators.
pub async fn run_capture(
    app: AppHandle,
    scope: CaptureScope,
    selected_category: Option<String>,
) -> Result<(), String> {
    let remembered = Settings::load(&app).last_category_id;
    let bridge = TauriBridge::new(app.clone());

    match capture_tabs(&bridge, scope, selected_category.as_deref(), remembered.as_deref()).await {
        Ok(outcome) => {
            let message = match outcome.channel {
                DeliveryChannel::Direct => {
                    format!("{} tab(s) sent to Later.", outcome.tab_count)
                }
                DeliveryChannel::Clipboard => format!(
                    "{} tab(s) copied to clipboard. Paste into Later to import.",
                    outcome.tab_count
                ),
            };
            report(&app, message, StatusKind::Success);
            remember_category(&app, &outcome.category_id);
            Ok(())
        }
        Err(e) => {
            log::warn!("[Capture] {}", e);
            report(&app, user_message(&e, scope), StatusKind::Error);
            Err(e.to_string())
        }
    }
}

/// Tauri command: save the active tab. `category_id` is the popup's
/// explicit selection; the quick-capture path passes none.
#[tauri::command]
pub async fn save_current_tab(app: AppHandle, category_id: Option<String>) -> Result<(), String> {
    run_capture(app, CaptureScope::ActiveTab, category_id).await
}

/// Tauri command: save every tab in the window.
#[tauri::command]
pub async fn save_all_tabs(app: AppHandle, category_id: Option<String>) -> Result<(), String> {
    run_capture(app, CaptureScope::AllTabs, category_id).await
}
