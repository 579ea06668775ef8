// Shared state managed by Tauri; commands and webview callbacks go through it.

use std::sync::{Mutex, MutexGuard};

use crate::error::{BrowserError, Result};
use crate::modules::controller::BrowserWindow;

pub struct AppState {
    window: Mutex<BrowserWindow>,
}

impl AppState {
    pub fn new(window: BrowserWindow) -> Self {
        Self {
            window: Mutex::new(window),
        }
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, BrowserWindow>> {
        self.window.lock().map_err(|_| BrowserError::StatePoisoned)
    }
}
