// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::canvas::Canvas;
use crate::clock::HandAngles;
use crate::font::{LabelFont, TextMeasure};
use crate::geometry::{FrameGeometry, Point, Rect};
use crate::paint::{DrawingTools, Paint};
use crate::style::{DialStyle, Hand};

const HOUR_LABELS: [&str; 12] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"];
const HAND_CORNER_RADIUS: f32 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    /// Text whose ink box has its bottom-left corner at `origin`.
    Label {
        origin: Point,
        text: String,
        paint: Paint,
    },
    Save,
    Restore,
    Rotate {
        degrees: f32,
        pivot: Point,
    },
    Rect {
        rect: Rect,
        paint: Paint,
    },
    RoundRect {
        rect: Rect,
        radius: f32,
        paint: Paint,
    },
}

/// Ordered draw commands for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Plays the scene onto `canvas`. Labels are skipped without a font.
    pub fn render(&self, canvas: &mut Canvas, font: Option<&LabelFont>) {
        for command in &self.commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    paint,
                } => canvas.draw_circle(*center, *radius, paint),
                DrawCommand::Label {
                    origin,
                    text,
                    paint,
                } => {
                    if let Some(font) = font {
                        canvas.draw_label(*origin, text, font, paint);
                    }
                }
                DrawCommand::Save => canvas.save(),
                DrawCommand::Restore => canvas.restore(),
                DrawCommand::Rotate { degrees, pivot } => canvas.rotate(*degrees, *pivot),
                DrawCommand::Rect { rect, paint } => canvas.draw_round_rect(*rect, 0.0, paint),
                DrawCommand::RoundRect {
                    rect,
                    radius,
                    paint,
                } => canvas.draw_round_rect(*rect, *radius, paint),
            }
        }
    }
}

// ============================================================================
// FRAME BUILDING
// ============================================================================

/// Lays out one frame of the clock: dial, center dot, hour labels and hands.
///
/// Every hand is wrapped in its own save/rotate/restore so the rotations
/// never stack.
pub fn build_frame(
    geometry: &FrameGeometry,
    angles: &HandAngles,
    tools: &DrawingTools,
    style: &DialStyle,
    labels: Option<&dyn TextMeasure>,
) -> Scene {
    let mut scene = Scene::new();

    scene.add_command(DrawCommand::Circle {
        center: geometry.center,
        radius: geometry.radius,
        paint: tools.dial,
    });
    scene.add_command(DrawCommand::Circle {
        center: geometry.center,
        radius: style.hour_line_width * 2.0,
        paint: tools.center_dot,
    });

    if let Some(measure) = labels {
        add_hour_labels(&mut scene, geometry, tools, measure);
    }

    for (hand, degrees) in [
        (Hand::Hour, angles.hour),
        (Hand::Minute, angles.minute),
        (Hand::Second, angles.second),
    ] {
        add_hand(&mut scene, geometry, tools, style, hand, degrees);
    }

    scene
}

fn add_hour_labels(
    scene: &mut Scene,
    geometry: &FrameGeometry,
    tools: &DrawingTools,
    measure: &dyn TextMeasure,
) {
    for (index, text) in HOUR_LABELS.iter().enumerate() {
        let value = (index + 1) as f32;
        let angle = value * 360.0 / HOUR_LABELS.len() as f32;
        let bounds = measure.text_bounds(text, tools.label.text_size);
        scene.add_command(DrawCommand::Label {
            origin: geometry.label_origin(angle, bounds.width, bounds.height),
            text: text.to_string(),
            paint: tools.label,
        });
    }
}

fn add_hand(
    scene: &mut Scene,
    geometry: &FrameGeometry,
    tools: &DrawingTools,
    style: &DialStyle,
    hand: Hand,
    degrees: f32,
) {
    let hand_style = style.hand(hand);
    let rect = geometry.hand_rect(hand_style.length, hand_style.width);
    let paint = *tools.hand(hand);

    scene.add_command(DrawCommand::Save);
    scene.add_command(DrawCommand::Rotate {
        degrees,
        pivot: geometry.center,
    });
    scene.add_command(match hand {
        Hand::Hour | Hand::Minute => DrawCommand::RoundRect {
            rect,
            radius: HAND_CORNER_RADIUS,
            paint,
        },
        Hand::Second => DrawCommand::Rect { rect, paint },
    });
    scene.add_command(DrawCommand::Restore);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ClockReading, HandMotion};
    use crate::font::TextBounds;
    use crate::geometry::Size;
    use crate::style::Color;

    /// Every string measures `6 px` per character by `10 px`.
    struct FixedMetrics;

    impl TextMeasure for FixedMetrics {
        fn text_bounds(&self, text: &str, _size: f32) -> TextBounds {
            TextBounds {
                width: 6.0 * text.len() as f32,
                height: 10.0,
            }
        }
    }

    fn sample_style() -> DialStyle {
        DialStyle::builder()
            .hour_line_length(50.0)
            .hour_line_width(10.0)
            .minute_line_length(70.0)
            .minute_line_width(6.0)
            .second_line_length(80.0)
            .second_line_width(2.0)
            .build()
    }

    fn frame_at(size: Size, angles: HandAngles) -> Scene {
        let style = sample_style();
        let tools = DrawingTools::from_style(&style);
        build_frame(
            &FrameGeometry::new(size),
            &angles,
            &tools,
            &style,
            Some(&FixedMetrics),
        )
    }

    /// Rotation in effect for each hand rectangle, in drawing order.
    fn effective_hand_rotations(scene: &Scene) -> Vec<f32> {
        let mut current = 0.0_f32;
        let mut stack = Vec::new();
        let mut rotations = Vec::new();
        for command in scene.commands() {
            match command {
                DrawCommand::Save => stack.push(current),
                DrawCommand::Restore => current = stack.pop().unwrap_or(current),
                DrawCommand::Rotate { degrees, .. } => current += *degrees,
                DrawCommand::Rect { .. } | DrawCommand::RoundRect { .. } => {
                    rotations.push(current)
                }
                _ => {}
            }
        }
        rotations
    }

    #[test]
    fn dial_is_centered_with_half_short_side_radius() {
        let scene = frame_at(
            Size::new(400, 260),
            HandAngles::new(ClockReading::new(0, 0, 0), HandMotion::Sweep),
        );

        match &scene.commands()[0] {
            DrawCommand::Circle {
                center,
                radius,
                paint,
            } => {
                assert_eq!(*center, Point::new(200.0, 130.0));
                assert_eq!(*radius, 130.0);
                assert_eq!(paint.style, crate::paint::PaintStyle::Stroke);
            }
            other => panic!("expected dial circle, got {other:?}"),
        }
    }

    #[test]
    fn center_dot_is_twice_the_hour_width() {
        let scene = frame_at(
            Size::new(200, 200),
            HandAngles::new(ClockReading::new(0, 0, 0), HandMotion::Sweep),
        );

        match &scene.commands()[1] {
            DrawCommand::Circle { radius, .. } => assert_eq!(*radius, 20.0),
            other => panic!("expected center dot, got {other:?}"),
        }
    }

    #[test]
    fn twelve_labels_run_clockwise_from_one() {
        let scene = frame_at(
            Size::new(200, 200),
            HandAngles::new(ClockReading::new(0, 0, 0), HandMotion::Sweep),
        );
        let labels: Vec<(&str, Point)> = scene
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Label { origin, text, .. } => Some((text.as_str(), *origin)),
                _ => None,
            })
            .collect();

        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0].0, "1");
        assert_eq!(labels[11].0, "12");

        let (_, twelve) = labels[11];
        let center_x = twelve.x + 12.0 / 2.0;
        let center_y = twelve.y - 10.0 / 2.0;
        assert!((center_x - 100.0).abs() < 1e-3);
        assert!((center_y - (100.0 - 80.0)).abs() < 1e-3);

        let (_, six) = labels[5];
        assert!(six.y > 100.0);
    }

    #[test]
    fn labels_are_omitted_without_metrics() {
        let style = sample_style();
        let tools = DrawingTools::from_style(&style);
        let scene = build_frame(
            &FrameGeometry::new(Size::new(200, 200)),
            &HandAngles::new(ClockReading::new(0, 0, 0), HandMotion::Sweep),
            &tools,
            &style,
            None,
        );

        assert!(!scene
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::Label { .. })));
    }

    #[test]
    fn hands_rotate_independently() {
        let scene = frame_at(
            Size::new(200, 200),
            HandAngles {
                hour: 30.0,
                minute: 90.0,
                second: 180.0,
            },
        );

        assert_eq!(effective_hand_rotations(&scene), vec![30.0, 90.0, 180.0]);
    }

    #[test]
    fn only_the_second_hand_has_square_corners() {
        let scene = frame_at(
            Size::new(200, 200),
            HandAngles::new(ClockReading::new(1, 2, 3), HandMotion::Sweep),
        );
        let shapes: Vec<&DrawCommand> = scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. } | DrawCommand::RoundRect { .. }))
            .collect();

        assert!(matches!(shapes[0], DrawCommand::RoundRect { radius, .. } if *radius == 20.0));
        assert!(matches!(shapes[1], DrawCommand::RoundRect { .. }));
        match shapes[2] {
            DrawCommand::Rect { rect, paint } => {
                assert_eq!(*rect, Rect::new(99.0, 20.0, 101.0, 100.0));
                assert_eq!(paint.color, Color::BLACK);
            }
            other => panic!("expected square second hand, got {other:?}"),
        }
    }
}
