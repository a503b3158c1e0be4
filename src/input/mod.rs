//! Input device support.

pub mod gamepad;
