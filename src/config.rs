//! Application constants and runtime configuration.
//!
//! Settings are intentionally not persisted anywhere; the struct below mirrors
//! what used to be compile-time switches (windowed size, fullscreen,
//! presentation sync, frame pacing).

use std::time::Duration;

/// Window title, also used for log banners.
pub const APP_NAME: &str = "Padview";

/// Fallback windowed size when fullscreen is disabled.
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

/// Lower bound on frame duration when no display sync paces the loop.
pub const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(2);

/// How presentation is synchronized with the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// No sync; the frame loop sleeps [`MIN_FRAME_INTERVAL`] per iteration
    /// to bound CPU usage.
    Disabled,
    /// Adaptive sync (tear when late, wait when early). Falls back to plain
    /// vsync when the surface does not support it.
    Adaptive,
}

/// Runtime configuration for the demo application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Use the best available exclusive fullscreen mode instead of a window.
    pub fullscreen: bool,
    pub sync_mode: SyncMode,
    pub min_frame_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: APP_NAME.to_string(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            fullscreen: false,
            sync_mode: SyncMode::Disabled,
            min_frame_interval: MIN_FRAME_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_windowed_demo() {
        let config = AppConfig::default();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 720);
        assert!(!config.fullscreen);
        assert_eq!(config.sync_mode, SyncMode::Disabled);
        assert_eq!(config.min_frame_interval, Duration::from_millis(2));
    }
}
