//! Fullscreen display-mode selection.
//!
//! Panels commonly list several timings for the same resolution, so the
//! selection runs in two passes: find the maximum pixel area, then pick the
//! highest refresh rate among the modes that have it. Ties are broken by
//! first-encountered order, which keeps the choice deterministic for
//! duplicate mode lists.

use tracing::{info, warn};
use winit::monitor::{MonitorHandle, VideoModeHandle};

/// One candidate mode as reported by the display subsystem.
///
/// Refresh is kept in millihertz as winit reports it; a value of zero means
/// the platform could not determine the rate and the mode never wins the
/// refresh tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeCandidate {
    pub width: u32,
    pub height: u32,
    pub refresh_millihertz: u32,
}

impl ModeCandidate {
    pub fn from_handle(handle: &VideoModeHandle) -> Self {
        let size = handle.size();
        Self {
            width: size.width,
            height: size.height,
            refresh_millihertz: handle.refresh_rate_millihertz(),
        }
    }

    /// Pixel area in u64 to avoid overflow on large panels.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Select the mode maximizing pixel area, using refresh rate to break area
/// ties. Returns the index into `candidates`, or `None` when the set is
/// empty (the caller then falls back to the desktop mode).
///
/// When every max-area candidate reports a zero refresh rate, the first
/// max-area candidate is returned.
pub fn select_fullscreen_mode(candidates: &[ModeCandidate]) -> Option<usize> {
    let max_area = candidates.iter().map(ModeCandidate::area).max()?;

    let mut best = None;
    let mut best_refresh = 0u32;
    for (index, mode) in candidates.iter().enumerate() {
        if mode.area() != max_area {
            continue;
        }
        if best.is_none() {
            best = Some(index);
        }
        // Strict comparison keeps the first occurrence on refresh ties.
        if mode.refresh_millihertz > best_refresh {
            best_refresh = mode.refresh_millihertz;
            best = Some(index);
        }
    }

    best
}

/// Enumerate `monitor`'s fullscreen modes and pick one for exclusive
/// presentation. `None` means the monitor reported no modes and the caller
/// should present on the desktop mode instead.
pub fn pick_video_mode(monitor: &MonitorHandle) -> Option<VideoModeHandle> {
    let modes: Vec<VideoModeHandle> = monitor.video_modes().collect();
    if modes.is_empty() {
        warn!("no fullscreen modes reported, using desktop mode");
        return None;
    }

    let candidates: Vec<ModeCandidate> = modes.iter().map(ModeCandidate::from_handle).collect();
    let index = select_fullscreen_mode(&candidates)?;
    let chosen = &candidates[index];
    info!(
        "fullscreen mode selected: {}x{} @ {} Hz",
        chosen.width,
        chosen.height,
        chosen.refresh_millihertz / 1000
    );
    Some(modes[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mode(width: u32, height: u32, refresh_hz: u32) -> ModeCandidate {
        ModeCandidate {
            width,
            height,
            refresh_millihertz: refresh_hz * 1000,
        }
    }

    #[test]
    fn test_max_area_wins_over_max_refresh() {
        let candidates = [mode(1920, 1080, 60), mode(1920, 1080, 144), mode(2560, 1440, 60)];
        assert_eq!(select_fullscreen_mode(&candidates), Some(2));
    }

    #[test]
    fn test_refresh_breaks_area_tie() {
        let candidates = [mode(1920, 1080, 60), mode(1920, 1080, 144)];
        assert_eq!(select_fullscreen_mode(&candidates), Some(1));
    }

    #[test]
    fn test_empty_set_returns_none() {
        assert_eq!(select_fullscreen_mode(&[]), None);
    }

    #[test]
    fn test_duplicate_modes_first_occurrence_wins() {
        let candidates = [mode(1920, 1080, 144), mode(1920, 1080, 144), mode(1920, 1080, 60)];
        assert_eq!(select_fullscreen_mode(&candidates), Some(0));
    }

    #[test]
    fn test_all_zero_refresh_returns_first_max_area() {
        let candidates = [mode(1280, 720, 0), mode(1920, 1080, 0), mode(1920, 1080, 0)];
        assert_eq!(select_fullscreen_mode(&candidates), Some(1));
    }

    #[test]
    fn test_zero_refresh_never_beats_positive_rate() {
        let candidates = [mode(1920, 1080, 0), mode(1920, 1080, 60)];
        assert_eq!(select_fullscreen_mode(&candidates), Some(1));
    }

    #[test]
    fn test_single_candidate() {
        let candidates = [mode(640, 480, 60)];
        assert_eq!(select_fullscreen_mode(&candidates), Some(0));
    }

    proptest! {
        #[test]
        fn selected_mode_maximizes_area(
            raw in prop::collection::vec((1u32..4096, 1u32..4096, 0u32..240), 1..32)
        ) {
            let candidates: Vec<ModeCandidate> =
                raw.iter().map(|&(w, h, hz)| mode(w, h, hz)).collect();
            let index = select_fullscreen_mode(&candidates).unwrap();
            let selected = candidates[index];
            prop_assert!(candidates.iter().all(|m| m.area() <= selected.area()));
        }

        #[test]
        fn selected_mode_maximizes_refresh_among_area_ties(
            raw in prop::collection::vec((1u32..4096, 1u32..4096, 0u32..240), 1..32)
        ) {
            let candidates: Vec<ModeCandidate> =
                raw.iter().map(|&(w, h, hz)| mode(w, h, hz)).collect();
            let index = select_fullscreen_mode(&candidates).unwrap();
            let selected = candidates[index];
            prop_assert!(candidates
                .iter()
                .filter(|m| m.area() == selected.area())
                .all(|m| m.refresh_millihertz <= selected.refresh_millihertz));
        }

        #[test]
        fn appending_smaller_modes_keeps_the_selection(
            raw in prop::collection::vec((64u32..4096, 64u32..4096, 0u32..240), 1..16)
        ) {
            let mut candidates: Vec<ModeCandidate> =
                raw.iter().map(|&(w, h, hz)| mode(w, h, hz)).collect();
            let index = select_fullscreen_mode(&candidates).unwrap();
            // Smaller area loses no matter how high its refresh rate is.
            candidates.push(mode(1, 1, 500));
            prop_assert_eq!(select_fullscreen_mode(&candidates), Some(index));
        }
    }
}
