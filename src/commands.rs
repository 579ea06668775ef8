use tauri::{AppHandle, State};

use crate::host::run_step;
use crate::modules::controller::{ChromeState, Command};
use crate::state::AppState;

// async: NewTab/OpenPortfolio create webviews, which deadlocks from a
// synchronous command on Windows
#[tauri::command]
pub async fn dispatch(
    app: AppHandle,
    state: State<'_, AppState>,
    command: Command,
) -> Result<ChromeState, String> {
    run_step(&app, state.inner(), |window| window.dispatch(command)).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn chrome_state(state: State<'_, AppState>) -> Result<ChromeState, String> {
    let window = state.lock().map_err(|e| e.to_string())?;
    Ok(window.chrome_state())
}
