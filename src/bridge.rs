// Host bridge: the single seam between the capture core and the host
// surfaces (tab registry, synced storage, clipboard, external scheme).
// Core logic only ever talks to this trait, so every flow is testable
// against the in-memory double below.

use async_trait::async_trait;
use tauri::{AppHandle, Manager};
use tauri_plugin_clipboard_manager::ClipboardExt;
use tauri_plugin_opener::OpenerExt;
use url::Url;

use crate::modules::sync_store::SyncStore;
use crate::state::AppState;

/// Which tabs a capture targets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CaptureScope {
    /// The active tab only.
    ActiveTab,
    /// Every tab in the window, in registry order.
    AllTabs,
}

/// A raw tab as seen at the capture boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct TabHandle {
    pub url: String,
    pub title: String,
}

/// Host capability set. All operations may suspend; errors are plain
/// strings here and mapped into the capture taxonomy by callers.
#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn query_tabs(&self, scope: CaptureScope) -> Result<Vec<TabHandle>, String>;
    async fn read_storage(&self, key: &str) -> Result<Option<String>, String>;
    async fn write_storage(&self, key: &str, value: String) -> Result<(), String>;
    async fn write_clipboard(&self, text: &str) -> Result<(), String>;
    /// Fire an external URI (custom scheme). Resolving Ok means the OS
    /// accepted the open; it does NOT prove the receiver handled it.
    async fn invoke_external(&self, uri: &str) -> Result<(), String>;
}

/// Production bridge over the Tauri shell.
pub struct TauriBridge {
    app: AppHandle,
    store: SyncStore,
}

impl TauriBridge {
    pub fn new(app: AppHandle) -> Self {
        let store = SyncStore::new(&app);
        Self { app, store }
    }
}

#[async_trait]
impl HostBridge for TauriBridge {
    async fn query_tabs(&self, scope: CaptureScope) -> Result<Vec<TabHandle>, String> {
        let state = self.app.state::<AppState>();
        let tabs = state.tabs.lock().map_err(|e| e.to_string())?;

        let handles = match scope {
            CaptureScope::AllTabs => tabs
                .iter()
                .map(|t| TabHandle {
                    url: t.url.clone(),
                    title: t.title.clone(),
                })
                .collect(),
            CaptureScope::ActiveTab => {
                let active_id = state.active_tab_id.lock().map_err(|e| e.to_string())?;
                tabs.iter()
                    .filter(|t| Some(&t.id) == active_id.as_ref())
                    .map(|t| TabHandle {
                        url: t.url.clone(),
                        title: t.title.clone(),
                    })
                    .collect()
            }
        };
        Ok(handles)
    }

    async fn read_storage(&self, key: &str) -> Result<Option<String>, String> {
        self.store.read(key)
    }

    async fn write_storage(&self, key: &str, value: String) -> Result<(), String> {
        self.store.write(key, &value)
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), String> {
        self.app
            .clipboard()
            .write_text(text.to_string())
            .map_err(|e| e.to_string())
    }

    async fn invoke_external(&self, uri: &str) -> Result<(), String> {
        // Reject malformed links before handing them to the OS; the opener
        // error path is much less specific.
        Url::parse(uri).map_err(|e| format!("invalid handoff link: {}", e))?;

        let app = self.app.clone();
        let uri = uri.to_string();
        // The opener may block on the spawned handler; keep it off the
        // async runtime so the dispatcher's bounded wait stays meaningful.
        tauri::async_runtime::spawn_blocking(move || {
            app.opener()
                .open_url(&uri, None::<&str>)
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())?
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// How the double's `invoke_external` behaves.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum InvokeBehavior {
        /// Resolve Ok immediately.
        Succeed,
        /// Resolve Err immediately.
        Fail,
        /// Never resolve (exercises the bounded-wait path).
        Hang,
    }

    /// In-memory bridge for unit and scenario tests.
    pub struct MemoryBridge {
        pub tabs: Vec<TabHandle>,
        pub active_index: Option<usize>,
        pub storage: Mutex<HashMap<String, String>>,
        pub clipboard: Mutex<Option<String>>,
        pub invoked: Mutex<Vec<String>>,
        pub invoke_behavior: InvokeBehavior,
        pub fail_storage_reads: bool,
        pub fail_storage_writes: bool,
        pub fail_clipboard: bool,
    }

    impl MemoryBridge {
        pub fn new() -> Self {
            Self {
                tabs: Vec::new(),
                active_index: None,
                storage: Mutex::new(HashMap::new()),
                clipboard: Mutex::new(None),
                invoked: Mutex::new(Vec::new()),
                invoke_behavior: InvokeBehavior::Succeed,
                fail_storage_reads: false,
                fail_storage_writes: false,
                fail_clipboard: false,
            }
        }

        pub fn with_tabs(tabs: Vec<TabHandle>) -> Self {
            let active = if tabs.is_empty() { None } else { Some(0) };
            Self {
                tabs,
                active_index: active,
                ..Self::new()
            }
        }

        pub fn invoked_links(&self) -> Vec<String> {
            self.invoked.lock().unwrap().clone()
        }

        pub fn clipboard_text(&self) -> Option<String> {
            self.clipboard.lock().unwrap().clone()
        }

        pub fn stored(&self, key: &str) -> Option<String> {
            self.storage.lock().unwrap().get(key).cloned()
        }
    }

    impl Default for MemoryBridge {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HostBridge for MemoryBridge {
        async fn query_tabs(&self, scope: CaptureScope) -> Result<Vec<TabHandle>, String> {
            match scope {
                CaptureScope::AllTabs => Ok(self.tabs.clone()),
                CaptureScope::ActiveTab => Ok(self
                    .active_index
                    .and_then(|i| self.tabs.get(i))
                    .cloned()
                    .into_iter()
                    .collect()),
            }
        }

        async fn read_storage(&self, key: &str) -> Result<Option<String>, String> {
            if self.fail_storage_reads {
                return Err("storage read unavailable".to_string());
            }
            Ok(self.storage.lock().unwrap().get(key).cloned())
        }

        async fn write_storage(&self, key: &str, value: String) -> Result<(), String> {
            if self.fail_storage_writes {
                return Err("storage write unavailable".to_string());
            }
            self.storage.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }

        async fn write_clipboard(&self, text: &str) -> Result<(), String> {
            if self.fail_clipboard {
                return Err("clipboard unavailable".to_string());
            }
            *self.clipboard.lock().unwrap() = Some(text.to_string());
            Ok(())
        }

        async fn invoke_external(&self, uri: &str) -> Result<(), String> {
            self.invoked.lock().unwrap().push(uri.to_string());
            match self.invoke_behavior {
                InvokeBehavior::Succeed => Ok(()),
                InvokeBehavior::Fail => Err("scheme handler rejected the link".to_string()),
                InvokeBehavior::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }
}
