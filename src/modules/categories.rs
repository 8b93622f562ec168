// Category resolution and bootstrap over the synced key-value store.
// All callers go through this adapter; nothing else touches the
// "categories" key, so the bootstrap logic lives in exactly one place.

use tauri::AppHandle;

use crate::bridge::{HostBridge, TauriBridge};
use crate::error::CaptureError;
use crate::modules::envelope::Category;
use crate::modules::ident::new_id;

pub const CATEGORIES_KEY: &str = "categories";
pub const DEFAULT_CATEGORY_NAME: &str = "Bookmarks";

/// Decode the stored category list. Unparseable payloads degrade to an
/// empty list (logged) rather than failing the capture.
fn parse_stored(raw: Option<String>) -> Vec<Category> {
    match raw {
        None => Vec::new(),
        Some(json) => match serde_json::from_str(&json) {
            Ok(categories) => categories,
            Err(e) => {
                log::warn!("[Categories] Failed to parse stored categories: {}", e);
                Vec::new()
            }
        },
    }
}

async fn persist(bridge: &dyn HostBridge, categories: &[Category]) -> Result<(), CaptureError> {
    let json = serde_json::to_string(categories)?;
    bridge
        .write_storage(CATEGORIES_KEY, json)
        .await
        .map_err(CaptureError::Storage)
}

/// Load the category list, bootstrapping a single "Bookmarks" default
/// when the persisted set is empty.
///
/// Storage failures never abort a capture: an unreadable store degrades
/// to an in-memory-only default (not persisted, so the real store is not
/// clobbered once it comes back), and a failed bootstrap write keeps the
/// default in memory for this flow. Two racing bootstrappers may persist
/// two distinct defaults; last writer wins and neither is corrected.
pub async fn load_categories(bridge: &dyn HostBridge) -> Vec<Category> {
    let (raw, read_failed) = match bridge.read_storage(CATEGORIES_KEY).await {
        Ok(raw) => (raw, false),
        Err(e) => {
            log::warn!("[Categories] Load failed: {}, degrading to in-memory default", e);
            (None, true)
        }
    };

    let mut categories = parse_stored(raw);
    if categories.is_empty() {
        let default = Category {
            id: new_id(),
            name: DEFAULT_CATEGORY_NAME.to_string(),
            created_at: None,
            updated_at: None,
        };
        categories.push(default);

        if !read_failed {
            if let Err(e) = persist(bridge, &categories).await {
                log::warn!("[Categories] Bootstrap persist failed: {}, continuing in-memory", e);
            }
        }
    }
    categories
}

/// Append a user-created category. A name that trims to empty is a
/// no-op (`Ok(None)`); the persisted set is left untouched.
pub async fn create_category(
    bridge: &dyn HostBridge,
    name: &str,
) -> Result<Option<Category>, CaptureError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let raw = bridge
        .read_storage(CATEGORIES_KEY)
        .await
        .map_err(CaptureError::Storage)?;
    let mut categories = parse_stored(raw);

    let now = chrono::Utc::now().to_rfc3339();
    let category = Category {
        id: new_id(),
        name: trimmed.to_string(),
        created_at: Some(now.clone()),
        updated_at: Some(now),
    };
    categories.push(category.clone());
    persist(bridge, &categories).await?;

    log::info!("[Categories] Created '{}' ({})", category.name, category.id);
    Ok(Some(category))
}

/// Tauri command: load (and bootstrap) the category list for the popup.
#[tauri::command]
pub async fn get_categories(app: AppHandle) -> Result<Vec<Category>, String> {
    let bridge = TauriBridge::new(app);
    Ok(load_categories(&bridge).await)
}

/// Tauri command: create a category from the popup's new-category form.
/// Returns None when the submitted name trims to empty.
#[tauri::command]
pub async fn add_category(app: AppHandle, name: String) -> Result<Option<Category>, String> {
    let bridge = TauriBridge::new(app);
    create_category(&bridge, &name).await.map_err(|e| e.to_string())
}
