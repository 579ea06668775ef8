// Gohar Browser library entry point.
// Pure logic lives in `modules` (no Tauri imports) so it can be tested on its own;
// `host` and `commands` are the Tauri side.

use tauri::Manager;

pub mod commands;
pub mod error;
pub mod host;
pub mod settings;
pub mod state;

// Pure logic modules (no Tauri imports)
pub mod modules;

use host::{run_step, TauriHost, MAIN_WINDOW};
use modules::controller::BrowserWindow;
use settings::Settings;
use state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let settings_path = Settings::path_in(&app.path().app_data_dir()?);
            let settings = Settings::load_or_init(&settings_path);
            log::info!("[Setup] Homepage {}", settings.homepage);

            // Managed before the first tab exists so page-load callbacks find it
            app.manage(AppState::new(BrowserWindow::new(settings)));
            run_step(app.handle(), app.state::<AppState>().inner(), |window| {
                window.open_initial_tab()
            })?;

            let main_window = app.get_window(MAIN_WINDOW).ok_or(error::BrowserError::NoWindow)?;
            let handle = app.handle().clone();
            main_window.on_window_event(move |event| {
                if let tauri::WindowEvent::Resized(_) = event {
                    let Some(state) = handle.try_state::<AppState>() else {
                        return;
                    };
                    let labels = match state.lock() {
                        Ok(window) => window.webview_labels(),
                        Err(e) => {
                            log::warn!("[Resize] {}", e);
                            return;
                        }
                    };
                    let host = TauriHost::new(handle.clone(), None);
                    if let Err(e) = host.layout_views(&labels) {
                        log::warn!("[Resize] Failed to lay out tabs: {}", e);
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::dispatch,
            commands::chrome_state
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
