//! Initialization error taxonomy.
//!
//! Every variant names the startup stage that failed so the caller can report
//! it precisely. [`InitError::NoGamepad`] is the one recoverable condition:
//! it is surfaced as a warning rather than an error, but startup still aborts
//! because the demo has nothing to monitor without a pad. Loop termination
//! (window close, exit button, disconnect) is a state transition, never an
//! error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitError {
    // Message only: gilrs errors may hold platform handles that are not
    // Send + Sync, which the binary boundary requires.
    #[error("gamepad backend unavailable: {0}")]
    GamepadBackend(String),

    #[error("no display available for mode query")]
    DisplayQuery,

    #[error("window creation failed: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("render surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter found")]
    NoAdapter,

    #[error("graphics device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("display reported an unusable scale factor ({0})")]
    ScaleFactor(f64),

    #[error("no gamepad device available")]
    NoGamepad,
}

impl InitError {
    /// True for conditions that degrade the demo rather than indicate a
    /// broken platform; callers log these as warnings.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, InitError::NoGamepad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_gamepad_absence_is_recoverable() {
        assert!(InitError::NoGamepad.is_recoverable());
        assert!(!InitError::DisplayQuery.is_recoverable());
        assert!(!InitError::NoAdapter.is_recoverable());
        assert!(!InitError::ScaleFactor(0.0).is_recoverable());
    }

    #[test]
    fn test_messages_name_the_failing_stage() {
        assert_eq!(
            InitError::DisplayQuery.to_string(),
            "no display available for mode query"
        );
        assert_eq!(
            InitError::NoGamepad.to_string(),
            "no gamepad device available"
        );
    }
}
