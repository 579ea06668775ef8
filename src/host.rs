// Tauri-backed engine host: the only place that touches webviews.

use tauri::webview::{PageLoadEvent, PageLoadPayload};
use tauri::{AppHandle, Emitter, Manager, PhysicalPosition, PhysicalSize, Webview, WebviewBuilder, WebviewUrl};
use url::Url;

use crate::error::{BrowserError, Result};
use crate::modules::controller::{BrowserWindow, ChromeState, LoadPhase, StyleOverride, Update, ViewHost};
use crate::modules::layout::{content_bounds, ContentBounds};
use crate::modules::navigation::{navigation_target, NavigationTarget};
use crate::modules::page_style;
use crate::state::AppState;

/// Window (and toolbar webview) label from tauri.conf.json.
pub const MAIN_WINDOW: &str = "main";
pub const CHROME_STATE_EVENT: &str = "chrome-state";

pub struct TauriHost {
    app: AppHandle,
    user_agent: Option<String>,
}

impl TauriHost {
    pub fn new(app: AppHandle, user_agent: Option<String>) -> Self {
        Self { app, user_agent }
    }

    fn view(&self, webview_label: &str) -> Result<Webview> {
        self.app
            .get_webview(webview_label)
            .ok_or_else(|| BrowserError::MissingView(webview_label.to_string()))
    }

    fn eval(&self, webview_label: &str, script: &str) -> Result<()> {
        self.view(webview_label)?.eval(script)?;
        Ok(())
    }

    fn bounds(&self) -> Result<ContentBounds> {
        let window = self.app.get_window(MAIN_WINDOW).ok_or(BrowserError::NoWindow)?;
        let size = window.inner_size()?;
        let scale = window.scale_factor()?;
        Ok(content_bounds(size.width, size.height, scale))
    }

    /// Fits every tab view to the current window size.
    pub fn layout_views(&self, webview_labels: &[String]) -> Result<()> {
        let bounds = self.bounds()?;
        for label in webview_labels {
            self.view(label)?.set_bounds(tauri::Rect {
                position: tauri::Position::Physical(PhysicalPosition::new(0, bounds.y)),
                size: tauri::Size::Physical(PhysicalSize::new(bounds.width, bounds.height)),
            })?;
        }
        Ok(())
    }
}

impl StyleOverride for TauriHost {
    fn apply(&self, webview_label: &str) -> Result<()> {
        self.eval(webview_label, &page_style::apply_script())
    }

    fn remove(&self, webview_label: &str) -> Result<()> {
        self.eval(webview_label, &page_style::remove_script())
    }
}

impl ViewHost for TauriHost {
    fn open_view(&self, webview_label: &str, url: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|_| BrowserError::InvalidUrl(url.to_string()))?;
        let window = self.app.get_window(MAIN_WINDOW).ok_or(BrowserError::NoWindow)?;
        let bounds = self.bounds()?;

        let mut builder = WebviewBuilder::new(webview_label, WebviewUrl::External(parsed))
            .on_page_load(forward_page_load);
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }

        window.add_child(
            builder,
            PhysicalPosition::new(0, bounds.y),
            PhysicalSize::new(bounds.width, bounds.height),
        )?;
        Ok(())
    }

    fn close_view(&self, webview_label: &str) -> Result<()> {
        self.view(webview_label)?.close()?;
        Ok(())
    }

    fn set_visible(&self, webview_label: &str, visible: bool) -> Result<()> {
        let view = self.view(webview_label)?;
        if visible {
            view.show()?;
        } else {
            view.hide()?;
        }
        Ok(())
    }

    fn navigate(&self, webview_label: &str, url: &str) -> Result<()> {
        match navigation_target(url) {
            NavigationTarget::Url(target) => self.view(webview_label)?.navigate(target)?,
            NavigationTarget::Script(script) => self.eval(webview_label, &script)?,
        }
        Ok(())
    }

    fn go_back(&self, webview_label: &str) -> Result<()> {
        self.eval(webview_label, "window.history.back()")
    }

    fn go_forward(&self, webview_label: &str) -> Result<()> {
        self.eval(webview_label, "window.history.forward()")
    }

    fn reload(&self, webview_label: &str) -> Result<()> {
        self.eval(webview_label, "window.location.reload()")
    }

    fn render_chrome(&self, state: &ChromeState) -> Result<()> {
        self.app.emit_to(MAIN_WINDOW, CHROME_STATE_EVENT, state)?;
        Ok(())
    }
}

/// Runs one controller step under the state lock, then applies its view work
/// with the lock released.
///
/// Webview creation waits on the main thread, which also takes the lock in
/// `forward_page_load`. A tab whose view fails to come up is discarded again.
pub fn run_step<F>(app: &AppHandle, state: &AppState, step: F) -> Result<ChromeState>
where
    F: FnOnce(&mut BrowserWindow) -> Update,
{
    let (update, user_agent) = {
        let mut window = state.lock()?;
        let update = step(&mut *window);
        (update, window.settings().user_agent.clone())
    };

    let host = TauriHost::new(app.clone(), user_agent);
    match update.apply(&host) {
        Ok(()) => Ok(update.state),
        Err(BrowserError::ViewCreation { webview_label, reason }) => {
            log::warn!("[Host] {} could not be created: {}", webview_label, reason);
            let rollback = state.lock()?.discard_tab(&webview_label);
            rollback.apply(&host)?;
            Err(BrowserError::ViewCreation { webview_label, reason })
        }
        Err(e) => Err(e),
    }
}

/// Page-load hook installed on every tab webview.
fn forward_page_load(webview: Webview, payload: PageLoadPayload<'_>) {
    let phase = match payload.event() {
        PageLoadEvent::Started => LoadPhase::Started,
        PageLoadEvent::Finished => LoadPhase::Finished,
    };
    let app = webview.app_handle().clone();
    let Some(state) = app.try_state::<AppState>() else {
        return;
    };

    let label = webview.label().to_string();
    let url = payload.url().to_string();
    if let Err(e) = run_step(&app, state.inner(), |window| window.on_page_load(&label, &url, phase)) {
        log::warn!("[PageLoad] {} ({}): {}", label, url, e);
    }
}
