// Shared state structs to avoid circular dependencies.
// These are used by lib.rs and can be tested independently.

use std::sync::{Arc, Mutex};
use serde::{Deserialize, Serialize};

/// One open page as reported by the UI shell.
/// The capture core never mutates these; it only snapshots them.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
}

pub struct AppState {
    pub tabs: Arc<Mutex<Vec<Tab>>>,
    pub active_tab_id: Arc<Mutex<Option<String>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tabs: Arc::new(Mutex::new(Vec::new())),
            active_tab_id: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
