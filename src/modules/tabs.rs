// Tab collection - pure logic, no Tauri imports.
// The strip owns ordering, the active tab and id allocation; views live in the host.

use serde::Serialize;

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: u64,
    pub webview_label: String,
    pub label: String,
    pub url: String,
    pub is_loading: bool,
}

#[derive(Debug, Default)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    active_id: Option<u64>,
    next_id: u64,
}

pub fn webview_label_for(id: u64) -> String {
    format!("tab-{}", id)
}

impl TabStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next `open` call will hand out.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Appends a tab and makes it active.
    pub fn open(&mut self, url: &str, label: &str) -> &Tab {
        let id = self.next_id;
        self.next_id += 1;

        self.tabs.push(Tab {
            id,
            webview_label: webview_label_for(id),
            label: label.to_string(),
            url: url.to_string(),
            is_loading: true,
        });
        self.active_id = Some(id);

        &self.tabs[self.tabs.len() - 1]
    }

    /// Removes a tab unless it is the last one.
    ///
    /// When the active tab goes, the tab that slid into its position becomes
    /// active (or the new last tab when it was at the end).
    pub fn close(&mut self, id: u64) -> Option<Tab> {
        if self.tabs.len() <= 1 {
            return None;
        }
        self.discard(id)
    }

    /// Drops a tab whose view never came up, even when it is the only one.
    pub fn discard(&mut self, id: u64) -> Option<Tab> {
        let index = self.position(id)?;
        let removed = self.tabs.remove(index);

        if self.active_id == Some(id) {
            let next = index.min(self.tabs.len().saturating_sub(1));
            self.active_id = self.tabs.get(next).map(|t| t.id);
        }

        Some(removed)
    }

    /// Returns false when no tab has that id.
    pub fn select(&mut self, id: u64) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.active_id = Some(id);
        true
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active_id.and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<u64> {
        self.active_id
    }

    pub fn get(&self, id: u64) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn find_by_label_mut(&mut self, webview_label: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.webview_label == webview_label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }
}
