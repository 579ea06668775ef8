// Scripts that add or remove the dark override stylesheet inside a loaded page.
// Only the host evaluates these; theme logic goes through `StyleOverride`.

/// Id of the injected `<style>` element, so removal leaves the page's own styles alone.
pub const OVERRIDE_STYLE_ID: &str = "gohar-dark-override";

const OVERRIDE_CSS: &str = r#"
body {
    background-color: #0d1117 !important;
    color: #f0f6fc !important;
}
a {
    color: #58a6ff !important;
}
h1, h2, h3, h4, h5, h6 {
    color: #f0f6fc !important;
}
code, pre {
    background-color: #161b22 !important;
    color: #f0f6fc !important;
}
table, th, td {
    border: 1px solid #30363d !important;
}
input, textarea, select {
    background-color: #161b22 !important;
    color: #f0f6fc !important;
    border: 1px solid #30363d !important;
}
button {
    background-color: #21262d !important;
    color: #f0f6fc !important;
    border: 1px solid #30363d !important;
}
::-webkit-scrollbar { width: 8px; }
::-webkit-scrollbar-track { background: #161b22; }
::-webkit-scrollbar-thumb {
    background: #30363d;
    border-radius: 4px;
}
::-webkit-scrollbar-thumb:hover { background: #58a6ff; }
"#;

/// Script inserting the override stylesheet; running it twice leaves one element.
pub fn apply_script() -> String {
    // serde_json gives a correctly escaped JS string literal
    let css = serde_json::to_string(OVERRIDE_CSS).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
        (function() {{
            var style = document.getElementById('{id}');
            if (!style) {{
                style = document.createElement('style');
                style.id = '{id}';
                style.type = 'text/css';
                (document.head || document.documentElement).appendChild(style);
            }}
            style.textContent = {css};
        }})();
        "#,
        id = OVERRIDE_STYLE_ID,
        css = css
    )
}

pub fn remove_script() -> String {
    format!(
        r#"
        (function() {{
            document.querySelectorAll('style#{id}').forEach(function(style) {{ style.remove(); }});
        }})();
        "#,
        id = OVERRIDE_STYLE_ID
    )
}
