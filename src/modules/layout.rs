// Content area geometry below the chrome strip.

/// Tab strip + toolbar + status line, in logical pixels.
pub const CHROME_HEIGHT: f64 = 44.0 + 40.0 + 22.0;

const MIN_CONTENT_HEIGHT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBounds {
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Physical rectangle for tab webviews inside a window of the given physical size.
pub fn content_bounds(window_width: u32, window_height: u32, scale_factor: f64) -> ContentBounds {
    let chrome_physical = (CHROME_HEIGHT * scale_factor) as u32;
    ContentBounds {
        y: chrome_physical as i32,
        width: window_width,
        height: window_height.saturating_sub(chrome_physical).max(MIN_CONTENT_HEIGHT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1200, 800, 1.0, 106, 694)]
    #[case(2400, 1600, 2.0, 212, 1388)]
    #[case(800, 120, 1.0, 106, 100)]
    #[case(800, 0, 1.5, 159, 100)]
    fn test_content_bounds(
        #[case] width: u32,
        #[case] height: u32,
        #[case] scale: f64,
        #[case] y: i32,
        #[case] content_height: u32,
    ) {
        let bounds = content_bounds(width, height, scale);
        assert_eq!(bounds, ContentBounds { y, width, height: content_height });
    }
}
