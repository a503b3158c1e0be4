//! Gamepad discovery and per-frame sampling using GilRs.
//!
//! Input is gathered in two phases per frame loop iteration: a discrete
//! phase that drains all pending events (hot-plug, disconnect), then a
//! continuous phase that samples stick axes and button state. Keeping the
//! phases separate keeps the ordering deterministic.

use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use tracing::{debug, info, warn};

/// One analog stick sample: axis values in [-1.0, 1.0] plus the stick-click
/// button. Written once per loop iteration, read by the overlay in the same
/// iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StickState {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
}

/// Buttons the demo cares about; presence is logged at discovery so missing
/// mappings are visible before the loop starts.
const CHECKED_BUTTONS: &[(Button, &str)] = &[
    (Button::East, "east (exit)"),
    (Button::LeftThumb, "left stick click"),
    (Button::RightThumb, "right stick click"),
    (Button::DPadUp, "dpad up"),
    (Button::DPadDown, "dpad down"),
    (Button::DPadLeft, "dpad left"),
    (Button::DPadRight, "dpad right"),
];

/// Returns true when `event` ends the session for the active gamepad.
/// Only a disconnect qualifies; button and axis traffic never does.
fn ends_session(event: &EventType) -> bool {
    matches!(event, EventType::Disconnected)
}

/// Owns the GilRs context and the one active gamepad.
pub struct GamepadInput {
    gilrs: Gilrs,
    active: Option<GamepadId>,
}

impl GamepadInput {
    /// Start the gamepad backend. Fails when the platform has no usable
    /// gamepad subsystem at all; absence of devices is reported separately
    /// by [`GamepadInput::discover`].
    pub fn new() -> Result<Self, gilrs::Error> {
        let gilrs = Gilrs::new()?;
        Ok(Self {
            gilrs,
            active: None,
        })
    }

    /// Enumerate connected gamepads and open the first one. Returns false
    /// when no device is available; the caller decides whether to abort.
    pub fn discover(&mut self) -> bool {
        let count = self.gilrs.gamepads().count();
        info!("found {count} gamepad(s)");

        let first = self.gilrs.gamepads().next().map(|(id, _)| id);
        match first {
            Some(id) => {
                let pad = self.gilrs.gamepad(id);
                info!(
                    "opened gamepad {id} | name: {} | mapping: {:?}",
                    pad.name(),
                    pad.mapping_source()
                );
                self.active = Some(id);
                self.log_button_mappings();
                true
            }
            None => false,
        }
    }

    /// Discrete phase: drain all pending events. Returns true when the
    /// active gamepad disconnected and the session should end.
    pub fn drain_events(&mut self) -> bool {
        let mut session_ended = false;

        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    debug!("gamepad connected: {id}");
                }
                _ if ends_session(&event) => {
                    if self.active == Some(id) {
                        warn!("active gamepad {id} disconnected");
                        self.active = None;
                        session_ended = true;
                    } else {
                        debug!("inactive gamepad {id} disconnected");
                    }
                }
                EventType::ButtonPressed(button, _) => {
                    debug!("button pressed: {button:?}");
                }
                _ => {}
            }
        }

        session_ended
    }

    /// Continuous phase: is the designated exit button held right now?
    pub fn exit_pressed(&self) -> bool {
        self.active
            .map(|id| self.gilrs.gamepad(id).is_pressed(Button::East))
            .unwrap_or(false)
    }

    /// Continuous phase: sample both analog sticks.
    pub fn sample_sticks(&self) -> (StickState, StickState) {
        let Some(id) = self.active else {
            return (StickState::default(), StickState::default());
        };
        let pad = self.gilrs.gamepad(id);

        let left = StickState {
            x: pad.value(Axis::LeftStickX),
            y: pad.value(Axis::LeftStickY),
            pressed: pad.is_pressed(Button::LeftThumb),
        };
        let right = StickState {
            x: pad.value(Axis::RightStickX),
            y: pad.value(Axis::RightStickY),
            pressed: pad.is_pressed(Button::RightThumb),
        };

        (left, right)
    }

    fn log_button_mappings(&self) {
        let Some(id) = self.active else {
            return;
        };
        let pad = self.gilrs.gamepad(id);

        for &(button, label) in CHECKED_BUTTONS {
            if pad.button_code(button).is_some() {
                info!("{label}: mapped");
            } else {
                warn!("{label}: not mapped on this gamepad");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnect_ends_session() {
        assert!(ends_session(&EventType::Disconnected));
    }

    #[test]
    fn test_other_events_do_not_end_session() {
        assert!(!ends_session(&EventType::Connected));
        assert!(!ends_session(&EventType::Dropped));
    }

    #[test]
    fn test_default_stick_state_is_centered() {
        let stick = StickState::default();
        assert_eq!(stick.x, 0.0);
        assert_eq!(stick.y, 0.0);
        assert!(!stick.pressed);
    }
}
