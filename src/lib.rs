// Later Capture - library entry point
// Exposes the capture core so it can be driven by main.rs and tested
// independently of the Tauri shell.

use tauri::menu::{MenuBuilder, MenuItemBuilder, PredefinedMenuItem, SubmenuBuilder};
use tauri::Manager;

// Host boundary
pub mod bridge;
pub mod state;

// Ambient
pub mod error;
pub mod settings;

// Capture core (pure logic + thin commands)
pub mod modules;

use crate::bridge::CaptureScope;
use crate::state::AppState;

pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            // Relaunching focuses the existing popup instead of stacking one
            if let Some(win) = app.get_webview_window("main") {
                let _ = win.set_focus();
            }
        }))
        .plugin(tauri_plugin_clipboard_manager::init())
        .plugin(tauri_plugin_opener::init())
        .manage(AppState::new())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // --- Build Native Menu ---
            let app_menu = SubmenuBuilder::new(app, "Later Capture")
                .item(&PredefinedMenuItem::about(app, Some("About Later Capture"), None)?)
                .separator()
                .item(&PredefinedMenuItem::quit(app, Some("Quit Later Capture"))?)
                .build()?;

            let capture_menu = SubmenuBuilder::new(app, "Capture")
                .item(
                    &MenuItemBuilder::with_id("save_current_tab", "Save Current Tab")
                        .accelerator("CmdOrCtrl+D")
                        .build(app)?,
                )
                .item(
                    &MenuItemBuilder::with_id("save_all_tabs", "Save All Tabs")
                        .accelerator("CmdOrCtrl+Shift+D")
                        .build(app)?,
                )
                .build()?;

            let menu = MenuBuilder::new(app)
                .items(&[&app_menu, &capture_menu])
                .build()?;
            app.set_menu(menu)?;

            // Menu accelerators drive the quick-capture flow: no explicit
            // category, so the remembered (or first) one is used.
            app.on_menu_event(move |app_handle, event| {
                let id = event.id().0.as_str();
                let scope = match id {
                    "save_current_tab" => Some(CaptureScope::ActiveTab),
                    "save_all_tabs" => Some(CaptureScope::AllTabs),
                    _ => None,
                };
                if let Some(scope) = scope {
                    let handle = app_handle.clone();
                    tauri::async_runtime::spawn(async move {
                        // Outcome is surfaced through the status reporter
                        let _ = modules::capture::run_capture(handle, scope, None).await;
                    });
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            modules::tabs::sync_tabs,
            modules::tabs::get_tabs,
            modules::categories::get_categories,
            modules::categories::add_category,
            modules::capture::save_current_tab,
            modules::capture::save_all_tabs,
            settings::get_settings,
            settings::update_settings
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
