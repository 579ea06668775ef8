// Window/tab controller - pure logic, no Tauri imports.
// Every toolbar affordance arrives as a `Command`. A step only changes window
// state and returns the view work as an `Update`; the caller runs it against a
// `ViewHost` after releasing whatever lock guards the controller.

use serde::{Deserialize, Serialize};

use crate::error::{BrowserError, Result};
use crate::modules::navigation::normalize_address;
use crate::modules::tabs::TabStrip;
use crate::modules::theme::Theme;
use crate::settings::Settings;

/// Adds or removes the dark override stylesheet in one view's document.
///
/// Fire-and-forget: success means the request reached the engine, not that
/// the page now looks different.
pub trait StyleOverride {
    fn apply(&self, webview_label: &str) -> Result<()>;
    fn remove(&self, webview_label: &str) -> Result<()>;
}

/// What the controller needs from the embedded engine and the chrome UI.
pub trait ViewHost: StyleOverride {
    fn open_view(&self, webview_label: &str, url: &str) -> Result<()>;
    fn close_view(&self, webview_label: &str) -> Result<()>;
    fn set_visible(&self, webview_label: &str, visible: bool) -> Result<()>;
    fn navigate(&self, webview_label: &str, url: &str) -> Result<()>;
    fn go_back(&self, webview_label: &str) -> Result<()>;
    fn go_forward(&self, webview_label: &str) -> Result<()>;
    fn reload(&self, webview_label: &str) -> Result<()>;
    fn render_chrome(&self, state: &ChromeState) -> Result<()>;
}

/// Everything the toolbar and tab strip can ask the window to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    Back,
    Forward,
    Reload,
    Home,
    NewTab,
    OpenPortfolio,
    ToggleTheme,
    Submit { text: String },
    SelectTab { id: u64 },
    CloseTab { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Started,
    Finished,
}

/// One request to the engine, addressed to a tab's webview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOp {
    Open { webview_label: String, url: String },
    Close { webview_label: String },
    SetVisible { webview_label: String, visible: bool },
    Navigate { webview_label: String, url: String },
    Back { webview_label: String },
    Forward { webview_label: String },
    Reload { webview_label: String },
    ApplyStyle { webview_label: String },
    RemoveStyle { webview_label: String },
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabView {
    pub id: u64,
    pub label: String,
    pub url: String,
    pub active: bool,
    pub loading: bool,
}

/// Snapshot the toolbar webview renders from.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChromeState {
    pub tabs: Vec<TabView>,
    pub url_text: String,
    pub theme: Theme,
    pub toggle_caption: String,
    pub chrome_css: String,
    pub status: String,
}

/// View work produced by one controller step, and the chrome to show after it.
#[derive(Clone, Debug, PartialEq)]
pub struct Update {
    pub ops: Vec<ViewOp>,
    pub state: ChromeState,
}

impl Update {
    /// Runs the ops in order, then renders the chrome.
    ///
    /// Style requests are fire-and-forget. A view that cannot be created
    /// stops the run with `BrowserError::ViewCreation` so the caller can
    /// discard its tab.
    pub fn apply<H: ViewHost>(&self, host: &H) -> Result<()> {
        for op in &self.ops {
            match op {
                ViewOp::Open { webview_label, url } => {
                    host.open_view(webview_label, url).map_err(|e| BrowserError::ViewCreation {
                        webview_label: webview_label.clone(),
                        reason: e.to_string(),
                    })?
                }
                ViewOp::Close { webview_label } => host.close_view(webview_label)?,
                ViewOp::SetVisible { webview_label, visible } => {
                    host.set_visible(webview_label, *visible)?
                }
                ViewOp::Navigate { webview_label, url } => host.navigate(webview_label, url)?,
                ViewOp::Back { webview_label } => host.go_back(webview_label)?,
                ViewOp::Forward { webview_label } => host.go_forward(webview_label)?,
                ViewOp::Reload { webview_label } => host.reload(webview_label)?,
                ViewOp::ApplyStyle { webview_label } => {
                    if let Err(e) = host.apply(webview_label) {
                        log::warn!("[Theme] Style override on {} failed: {}", webview_label, e);
                    }
                }
                ViewOp::RemoveStyle { webview_label } => {
                    if let Err(e) = host.remove(webview_label) {
                        log::warn!("[Theme] Style removal on {} failed: {}", webview_label, e);
                    }
                }
            }
        }
        host.render_chrome(&self.state)
    }
}

pub struct BrowserWindow {
    tabs: TabStrip,
    theme: Theme,
    url_text: String,
    status: String,
    settings: Settings,
}

impl BrowserWindow {
    pub fn new(settings: Settings) -> Self {
        Self {
            tabs: TabStrip::new(),
            theme: Theme::default(),
            url_text: String::new(),
            status: String::new(),
            settings: settings.normalized(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn tabs(&self) -> &TabStrip {
        &self.tabs
    }

    pub fn webview_labels(&self) -> Vec<String> {
        self.tabs.iter().map(|t| t.webview_label.clone()).collect()
    }

    /// Opens the first tab on the homepage.
    pub fn open_initial_tab(&mut self) -> Update {
        let mut ops = Vec::new();
        let home = self.settings.homepage.clone();
        let label = self.settings.new_tab_label.clone();
        self.open_tab(&mut ops, &home, &label);
        self.finish(ops)
    }

    pub fn dispatch(&mut self, command: Command) -> Update {
        log::debug!("[Window] Dispatch {:?}", command);
        let mut ops = Vec::new();

        match command {
            Command::Back => {
                if let Some(webview_label) = self.active_label() {
                    ops.push(ViewOp::Back { webview_label });
                }
            }
            Command::Forward => {
                if let Some(webview_label) = self.active_label() {
                    ops.push(ViewOp::Forward { webview_label });
                }
            }
            Command::Reload => {
                if let Some(webview_label) = self.active_label() {
                    ops.push(ViewOp::Reload { webview_label });
                }
            }
            Command::Home => {
                let home = self.settings.homepage.clone();
                self.navigate_active(&mut ops, &home);
            }
            Command::Submit { text } => {
                if let Some(address) = normalize_address(&text) {
                    self.navigate_active(&mut ops, &address);
                }
            }
            Command::NewTab => {
                let home = self.settings.homepage.clone();
                let label = self.settings.new_tab_label.clone();
                self.open_tab(&mut ops, &home, &label);
            }
            Command::OpenPortfolio => {
                let url = self.settings.portfolio_url.clone();
                let label = self.settings.portfolio_label.clone();
                self.open_tab(&mut ops, &url, &label);
            }
            Command::ToggleTheme => self.toggle_theme(&mut ops),
            Command::SelectTab { id } => {
                if self.tabs.select(id) {
                    self.show_active(&mut ops);
                }
            }
            Command::CloseTab { id } => {
                if let Some(closed) = self.tabs.close(id) {
                    log::info!("[Window] Closed tab '{}' at {}", closed.label, closed.url);
                    ops.push(ViewOp::Close { webview_label: closed.webview_label });
                    self.show_active(&mut ops);
                }
            }
        }

        self.finish(ops)
    }

    /// Engine notification: a view started or finished loading `url`.
    pub fn on_page_load(&mut self, webview_label: &str, url: &str, phase: LoadPhase) -> Update {
        let mut ops = Vec::new();
        let active_id = self.tabs.active_id();
        let Some(tab) = self.tabs.find_by_label_mut(webview_label) else {
            return self.finish(ops);
        };

        tab.url = url.to_string();
        tab.is_loading = phase == LoadPhase::Started;
        let is_active = Some(tab.id) == active_id;

        if is_active {
            self.url_text = url.to_string();
            self.status = match phase {
                LoadPhase::Started => format!("Loading {}…", url),
                LoadPhase::Finished => "Done".to_string(),
            };
        }

        // A new document drops whatever was injected into the old one
        if phase == LoadPhase::Finished && self.theme.is_dark() {
            ops.push(ViewOp::ApplyStyle { webview_label: webview_label.to_string() });
        }

        self.finish(ops)
    }

    /// Forgets a tab whose webview could not be created.
    pub fn discard_tab(&mut self, webview_label: &str) -> Update {
        let mut ops = Vec::new();
        let id = self
            .tabs
            .iter()
            .find(|t| t.webview_label == webview_label)
            .map(|t| t.id);

        if let Some(id) = id {
            self.tabs.discard(id);
            self.show_active(&mut ops);
            self.status = format!("Could not open {}", webview_label);
        }
        self.finish(ops)
    }

    pub fn chrome_state(&self) -> ChromeState {
        let active_id = self.tabs.active_id();
        ChromeState {
            tabs: self
                .tabs
                .iter()
                .map(|t| TabView {
                    id: t.id,
                    label: t.label.clone(),
                    url: t.url.clone(),
                    active: Some(t.id) == active_id,
                    loading: t.is_loading,
                })
                .collect(),
            url_text: self.url_text.clone(),
            theme: self.theme,
            toggle_caption: self.theme.toggle_caption().to_string(),
            chrome_css: self.theme.chrome_stylesheet().to_string(),
            status: self.status.clone(),
        }
    }

    fn open_tab(&mut self, ops: &mut Vec<ViewOp>, url: &str, label: &str) {
        let webview_label = self.tabs.open(url, label).webview_label.clone();
        log::info!("[Window] Opening {} '{}' at {}", webview_label, label, url);

        ops.push(ViewOp::Open { webview_label: webview_label.clone(), url: url.to_string() });
        if self.theme.is_dark() {
            ops.push(ViewOp::ApplyStyle { webview_label });
        }

        self.show_active(ops);
        self.status = format!("Loading {}…", url);
    }

    fn navigate_active(&mut self, ops: &mut Vec<ViewOp>, url: &str) {
        let Some(id) = self.tabs.active_id() else {
            return;
        };
        let Some(tab) = self.tabs.get_mut(id) else {
            return;
        };

        ops.push(ViewOp::Navigate {
            webview_label: tab.webview_label.clone(),
            url: url.to_string(),
        });
        tab.url = url.to_string();
        self.url_text = url.to_string();
    }

    fn toggle_theme(&mut self, ops: &mut Vec<ViewOp>) {
        self.theme = self.theme.toggled();
        log::info!("[Theme] Switched to {:?}", self.theme);

        for tab in self.tabs.iter() {
            let webview_label = tab.webview_label.clone();
            ops.push(if self.theme.is_dark() {
                ViewOp::ApplyStyle { webview_label }
            } else {
                ViewOp::RemoveStyle { webview_label }
            });
        }
    }

    /// Shows the active view, hides the rest and syncs the URL field.
    fn show_active(&mut self, ops: &mut Vec<ViewOp>) {
        let active_id = self.tabs.active_id();
        for tab in self.tabs.iter() {
            ops.push(ViewOp::SetVisible {
                webview_label: tab.webview_label.clone(),
                visible: Some(tab.id) == active_id,
            });
        }
        if let Some(tab) = self.tabs.active() {
            self.url_text = tab.url.clone();
        }
    }

    fn active_label(&self) -> Option<String> {
        self.tabs.active().map(|t| t.webview_label.clone())
    }

    fn finish(&self, ops: Vec<ViewOp>) -> Update {
        Update {
            ops,
            state: self.chrome_state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    fn open(label: &str, url: &str) -> ViewOp {
        ViewOp::Open { webview_label: label.into(), url: url.into() }
    }

    fn visible(label: &str, visible: bool) -> ViewOp {
        ViewOp::SetVisible { webview_label: label.into(), visible }
    }

    fn navigate(label: &str, url: &str) -> ViewOp {
        ViewOp::Navigate { webview_label: label.into(), url: url.into() }
    }

    fn apply_style(label: &str) -> ViewOp {
        ViewOp::ApplyStyle { webview_label: label.into() }
    }

    fn remove_style(label: &str) -> ViewOp {
        ViewOp::RemoveStyle { webview_label: label.into() }
    }

    fn started() -> BrowserWindow {
        let mut window = BrowserWindow::new(Settings::default());
        window.open_initial_tab();
        window
    }

    #[test]
    fn test_initial_tab_opens_homepage() {
        let mut window = BrowserWindow::new(Settings::default());
        let update = window.open_initial_tab();

        assert_eq!(
            update.ops,
            vec![open("tab-0", "https://www.google.com"), visible("tab-0", true)]
        );
        assert_eq!(update.state.tabs.len(), 1);
        assert_eq!(update.state.tabs[0].label, "🌍 New Tab");
        assert_eq!(update.state.url_text, "https://www.google.com");
        assert_eq!(update.state.theme, Theme::Light);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5)]
    fn test_new_tabs_add_to_initial(#[case] n: usize) {
        let mut window = started();
        for _ in 0..n {
            window.dispatch(Command::NewTab);
        }
        assert_eq!(window.tabs().len(), n + 1);
    }

    #[test]
    fn test_new_tab_hides_previous() {
        let mut window = started();
        let update = window.dispatch(Command::NewTab);

        assert_eq!(
            update.ops,
            vec![
                open("tab-1", "https://www.google.com"),
                visible("tab-0", false),
                visible("tab-1", true),
            ]
        );
    }

    #[test]
    fn test_close_tab() {
        let mut window = started();
        window.dispatch(Command::NewTab);

        let update = window.dispatch(Command::CloseTab { id: 1 });
        assert_eq!(update.state.tabs.len(), 1);
        assert_eq!(
            update.ops,
            vec![ViewOp::Close { webview_label: "tab-1".into() }, visible("tab-0", true)]
        );

        let update = window.dispatch(Command::CloseTab { id: 0 });
        assert_eq!(update.state.tabs.len(), 1);
        assert!(update.ops.is_empty());
    }

    #[rstest]
    #[case("example.com", "https://example.com")]
    #[case("http://example.com", "http://example.com")]
    fn test_submit_navigates_active(#[case] typed: &str, #[case] expected: &str) {
        let mut window = started();
        let update = window.dispatch(Command::Submit { text: typed.to_string() });

        assert_eq!(update.ops, vec![navigate("tab-0", expected)]);
        assert_eq!(update.state.url_text, expected);
    }

    #[test]
    fn test_blank_submit_does_nothing() {
        let mut window = started();
        let update = window.dispatch(Command::Submit { text: "  ".into() });
        assert!(update.ops.is_empty());
    }

    #[test]
    fn test_history_actions_target_active_tab() {
        let mut window = started();
        window.dispatch(Command::NewTab);
        window.dispatch(Command::SelectTab { id: 0 });

        let ops: Vec<ViewOp> = [Command::Back, Command::Forward, Command::Reload]
            .into_iter()
            .flat_map(|command| window.dispatch(command).ops)
            .collect();

        assert_eq!(
            ops,
            vec![
                ViewOp::Back { webview_label: "tab-0".into() },
                ViewOp::Forward { webview_label: "tab-0".into() },
                ViewOp::Reload { webview_label: "tab-0".into() },
            ]
        );
    }

    #[test]
    fn test_actions_without_tabs_are_noops() {
        let mut window = BrowserWindow::new(Settings::default());

        for command in [
            Command::Back,
            Command::Forward,
            Command::Reload,
            Command::Home,
            Command::Submit { text: "example.com".into() },
        ] {
            assert!(window.dispatch(command).ops.is_empty());
        }
    }

    #[test]
    fn test_home_ignores_history() {
        let mut window = started();
        window.dispatch(Command::Submit { text: "rust-lang.org".into() });
        window.on_page_load("tab-0", "https://www.rust-lang.org/learn", LoadPhase::Finished);

        let update = window.dispatch(Command::Home);
        assert_eq!(update.ops, vec![navigate("tab-0", "https://www.google.com")]);
        assert_eq!(update.state.url_text, "https://www.google.com");
    }

    #[test]
    fn test_schemeless_configured_addresses_are_absolute() {
        let settings = Settings {
            homepage: "duckduckgo.com".to_string(),
            portfolio_url: "example.org/me".to_string(),
            ..Settings::default()
        };
        let mut window = BrowserWindow::new(settings);

        let update = window.open_initial_tab();
        assert_eq!(update.ops[0], open("tab-0", "https://duckduckgo.com"));

        let update = window.dispatch(Command::Home);
        assert_eq!(update.ops, vec![navigate("tab-0", "https://duckduckgo.com")]);

        let update = window.dispatch(Command::OpenPortfolio);
        assert_eq!(update.ops[0], open("tab-1", "https://example.org/me"));
    }

    #[test]
    fn test_portfolio_always_opens_new_tab() {
        let mut window = started();
        window.dispatch(Command::NewTab);
        window.dispatch(Command::SelectTab { id: 0 });

        let update = window.dispatch(Command::OpenPortfolio);
        assert_eq!(update.state.tabs.len(), 3);
        let active = update.state.tabs.iter().find(|t| t.active).unwrap();
        assert_eq!(active.url, "https://syedgoharhussain.github.io/Portfolio/");
        assert_eq!(active.label, "👨‍💻 Portfolio");
    }

    #[test]
    fn test_toggle_twice_restores_light() {
        let mut window = started();
        window.dispatch(Command::NewTab);
        let before = window.chrome_state();

        let dark = window.dispatch(Command::ToggleTheme);
        assert_eq!(dark.state.theme, Theme::Dark);
        assert_eq!(dark.state.toggle_caption, "☀️ Light Mode");
        assert_eq!(dark.ops, vec![apply_style("tab-0"), apply_style("tab-1")]);

        let light = window.dispatch(Command::ToggleTheme);
        assert_eq!(light.ops, vec![remove_style("tab-0"), remove_style("tab-1")]);
        assert_eq!(light.state, before);
    }

    #[test]
    fn test_dark_mode_reaches_new_tabs_and_reloads() {
        let mut window = started();
        window.dispatch(Command::ToggleTheme);

        let update = window.dispatch(Command::NewTab);
        assert!(update.ops.contains(&apply_style("tab-1")));

        let update = window.on_page_load("tab-1", "https://www.google.com/", LoadPhase::Started);
        assert!(update.ops.is_empty());

        let update = window.on_page_load("tab-1", "https://www.google.com/", LoadPhase::Finished);
        assert_eq!(update.ops, vec![apply_style("tab-1")]);
    }

    #[test]
    fn test_page_load_updates_url_field_for_active_tab_only() {
        let mut window = started();
        window.dispatch(Command::NewTab);

        window.on_page_load("tab-0", "https://background.test/", LoadPhase::Started);
        let state = window.chrome_state();
        assert_eq!(state.url_text, "https://www.google.com");
        assert_eq!(state.tabs[0].url, "https://background.test/");
        assert!(state.tabs[0].loading);

        window.on_page_load("tab-1", "https://front.test/", LoadPhase::Started);
        assert_eq!(window.chrome_state().status, "Loading https://front.test/…");

        let update = window.on_page_load("tab-1", "https://front.test/", LoadPhase::Finished);
        assert_eq!(update.state.url_text, "https://front.test/");
        assert_eq!(update.state.status, "Done");
        assert!(!update.state.tabs[1].loading);
    }

    #[test]
    fn test_page_load_for_unknown_view_is_ignored() {
        let mut window = started();
        let before = window.chrome_state();
        let update = window.on_page_load("main", "tauri://localhost", LoadPhase::Finished);
        assert!(update.ops.is_empty());
        assert_eq!(update.state, before);
    }

    #[test]
    fn test_select_tab_syncs_url_field() {
        let mut window = started();
        window.dispatch(Command::OpenPortfolio);

        let update = window.dispatch(Command::SelectTab { id: 0 });
        assert_eq!(update.state.url_text, "https://www.google.com");
        assert_eq!(update.ops, vec![visible("tab-0", true), visible("tab-1", false)]);

        let update = window.dispatch(Command::SelectTab { id: 42 });
        assert!(update.ops.is_empty());
    }

    #[test]
    fn test_discard_tab_reveals_previous() {
        let mut window = started();
        window.dispatch(Command::NewTab);

        let update = window.discard_tab("tab-1");
        assert_eq!(update.ops, vec![visible("tab-0", true)]);
        assert_eq!(update.state.tabs.len(), 1);
        assert_eq!(update.state.url_text, "https://www.google.com");
    }

    #[test]
    fn test_command_wire_format() {
        let cmd: Command = serde_json::from_str(r#"{"type":"submit","text":"example.com"}"#).unwrap();
        assert_eq!(cmd, Command::Submit { text: "example.com".to_string() });

        let cmd: Command = serde_json::from_str(r#"{"type":"closeTab","id":3}"#).unwrap();
        assert_eq!(cmd, Command::CloseTab { id: 3 });

        let cmd: Command = serde_json::from_str(r#"{"type":"toggleTheme"}"#).unwrap();
        assert_eq!(cmd, Command::ToggleTheme);
    }

    // --- Update::apply against a recording host ---

    #[derive(Default)]
    struct RecordingHost {
        calls: RefCell<Vec<String>>,
        failing: Option<&'static str>,
    }

    impl RecordingHost {
        fn record(&self, call: String) -> Result<()> {
            let failed = self.failing.is_some_and(|f| call.starts_with(f));
            self.calls.borrow_mut().push(call);
            if failed {
                return Err(BrowserError::Webview("engine refused".to_string()));
            }
            Ok(())
        }
    }

    impl StyleOverride for RecordingHost {
        fn apply(&self, webview_label: &str) -> Result<()> {
            self.record(format!("apply {}", webview_label))
        }
        fn remove(&self, webview_label: &str) -> Result<()> {
            self.record(format!("remove {}", webview_label))
        }
    }

    impl ViewHost for RecordingHost {
        fn open_view(&self, webview_label: &str, url: &str) -> Result<()> {
            self.record(format!("open {} {}", webview_label, url))
        }
        fn close_view(&self, webview_label: &str) -> Result<()> {
            self.record(format!("close {}", webview_label))
        }
        fn set_visible(&self, webview_label: &str, visible: bool) -> Result<()> {
            self.record(format!("visible {} {}", webview_label, visible))
        }
        fn navigate(&self, webview_label: &str, url: &str) -> Result<()> {
            self.record(format!("navigate {} {}", webview_label, url))
        }
        fn go_back(&self, webview_label: &str) -> Result<()> {
            self.record(format!("back {}", webview_label))
        }
        fn go_forward(&self, webview_label: &str) -> Result<()> {
            self.record(format!("forward {}", webview_label))
        }
        fn reload(&self, webview_label: &str) -> Result<()> {
            self.record(format!("reload {}", webview_label))
        }
        fn render_chrome(&self, _state: &ChromeState) -> Result<()> {
            self.record("render".to_string())
        }
    }

    #[test]
    fn test_apply_runs_ops_in_order_then_renders() {
        let host = RecordingHost::default();
        let mut window = BrowserWindow::new(Settings::default());
        window.open_initial_tab().apply(&host).unwrap();

        assert_eq!(
            *host.calls.borrow(),
            vec!["open tab-0 https://www.google.com", "visible tab-0 true", "render"]
        );
    }

    #[test]
    fn test_apply_continues_past_failed_style() {
        let host = RecordingHost {
            failing: Some("apply tab-0"),
            ..RecordingHost::default()
        };
        let mut window = started();
        window.dispatch(Command::NewTab);

        window.dispatch(Command::ToggleTheme).apply(&host).unwrap();
        assert_eq!(*host.calls.borrow(), vec!["apply tab-0", "apply tab-1", "render"]);
    }

    #[test]
    fn test_apply_reports_view_creation_failure() {
        let host = RecordingHost {
            failing: Some("open"),
            ..RecordingHost::default()
        };
        let mut window = started();

        let err = window.dispatch(Command::NewTab).apply(&host).unwrap_err();
        match err {
            BrowserError::ViewCreation { webview_label, .. } => assert_eq!(webview_label, "tab-1"),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(*host.calls.borrow(), vec!["open tab-1 https://www.google.com"]);
    }
}
