// Module exports for pure logic
pub mod controller;  // Window/tab command dispatch
pub mod layout;
pub mod navigation;
pub mod page_style;  // Dark override injected into pages
pub mod tabs;
pub mod theme;
