// Theme state and the chrome (toolbar / tab strip) stylesheets.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Caption of the toggle button: names the theme it switches to.
    pub fn toggle_caption(self) -> &'static str {
        match self {
            Self::Light => "🌙 Dark Mode",
            Self::Dark => "☀️ Light Mode",
        }
    }

    pub fn chrome_stylesheet(self) -> &'static str {
        match self {
            Self::Light => LIGHT_CHROME_CSS,
            Self::Dark => DARK_CHROME_CSS,
        }
    }
}

const DARK_CHROME_CSS: &str = r#"
body { background-color: #0d1117; }
.toolbar {
    background-color: #161b22;
    padding: 5px;
    border-bottom: 1px solid #30363d;
}
.toolbar button {
    font-size: 14px;
    padding: 5px 10px;
    color: #f0f6fc;
    background: transparent;
}
.toolbar button:hover { background-color: #21262d; }
#url-bar {
    font-size: 14px;
    padding: 5px;
    border: 1px solid #30363d;
    border-radius: 5px;
    min-width: 400px;
    background-color: #0d1117;
    color: #f0f6fc;
}
.tab {
    background: #161b22;
    padding: 10px;
    border: 1px solid #30363d;
    color: #f0f6fc;
}
.tab.selected {
    background: #0d1117;
    border-bottom: 2px solid #58a6ff;
}
.tab:hover { background: #21262d; }
.status-bar {
    background-color: #161b22;
    color: #f0f6fc;
}
"#;

const LIGHT_CHROME_CSS: &str = r#"
body { background-color: #f0f0f0; }
.toolbar {
    background-color: #f0f0f0;
    padding: 5px;
    border-bottom: 1px solid #ccc;
}
.toolbar button {
    font-size: 14px;
    padding: 5px 10px;
    color: #000; /* black text */
    background: transparent;
}
.toolbar button:hover { background-color: #ddd; }
#url-bar {
    font-size: 14px;
    padding: 5px;
    border: 1px solid #ccc;
    border-radius: 5px;
    min-width: 400px;
    background-color: #fff;
    color: #000;
}
.tab {
    background: #f0f0f0;
    padding: 10px;
    border: 1px solid #ccc;
    color: #000;
}
.tab.selected {
    background: #fff;
    border-bottom: 2px solid #0078d7; /* blue selection */
}
.tab:hover { background: #ddd; }
.status-bar {
    background-color: #f0f0f0;
    color: #000;
}
"#;
