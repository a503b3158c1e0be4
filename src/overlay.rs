//! Diagnostic overlay: a fixed, semi-transparent panel in the top-left
//! corner showing frame statistics and analog stick values.

use egui::{Align2, Color32};

use crate::input::gamepad::StickState;
use crate::perf::PerformanceSample;

fn frame_stats_line(sample: PerformanceSample) -> String {
    format!(
        "Application average {:.3} ms/frame ({:.1} FPS)",
        sample.average_frame_time_ms, sample.average_fps
    )
}

fn stick_line(label: &str, stick: StickState) -> String {
    let pressed = if stick.pressed { " | pressed" } else { "" };
    format!(
        "{label} stick : X = {:+.2} | Y = {:+.2}{pressed}",
        stick.x, stick.y
    )
}

/// Draw the overlay for this frame.
pub fn draw(ctx: &egui::Context, sample: PerformanceSample, left: StickState, right: StickState) {
    egui::Window::new("perf monitor")
        .anchor(Align2::LEFT_TOP, [8.0, 8.0])
        .title_bar(false)
        .resizable(false)
        .movable(false)
        .interactable(false)
        .frame(egui::Frame::window(&ctx.style()).fill(Color32::from_black_alpha(76)))
        .show(ctx, |ui| {
            ui.monospace(frame_stats_line(sample));
            ui.monospace(stick_line("Left ", left));
            ui.monospace(stick_line("Right", right));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_stats_line_formatting() {
        let sample = PerformanceSample {
            average_frame_time_ms: 16.666,
            average_fps: 60.0,
        };
        assert_eq!(
            frame_stats_line(sample),
            "Application average 16.666 ms/frame (60.0 FPS)"
        );
    }

    #[test]
    fn test_stick_line_formatting() {
        let stick = StickState {
            x: 0.5,
            y: -1.0,
            pressed: false,
        };
        assert_eq!(
            stick_line("Left ", stick),
            "Left  stick : X = +0.50 | Y = -1.00"
        );
    }

    #[test]
    fn test_stick_line_marks_pressed_stick() {
        let stick = StickState {
            x: 0.0,
            y: 0.0,
            pressed: true,
        };
        assert!(stick_line("Right", stick).ends_with("| pressed"));
    }
}
