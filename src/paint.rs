use crate::style::{Color, DialStyle, Hand};

const DIAL_STROKE_WIDTH: f32 = 2.0;
const LABEL_TEXT_SIZE: f32 = 40.0;
const HOUR_STROKE_WIDTH: f32 = 5.0;
const MINUTE_STROKE_WIDTH: f32 = 2.0;
const SECOND_STROKE_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// How a shape or label is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub anti_alias: bool,
    pub text_size: f32,
}

impl Paint {
    const fn new(color: Color, style: PaintStyle, stroke_width: f32) -> Self {
        Self {
            color,
            style,
            stroke_width,
            anti_alias: true,
            text_size: 0.0,
        }
    }

    const fn with_text_size(self, text_size: f32) -> Self {
        Self { text_size, ..self }
    }
}

/// The fixed set of paints used for every frame.
///
/// Hand paints only take their color from [`DialStyle`]. Their stroke width is
/// a constant; the style's hand width sizes the hand rectangle instead.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingTools {
    pub dial: Paint,
    pub label: Paint,
    pub center_dot: Paint,
    pub hour: Paint,
    pub minute: Paint,
    pub second: Paint,
}

impl DrawingTools {
    pub fn from_style(style: &DialStyle) -> Self {
        Self {
            dial: Paint::new(Color::BLACK, PaintStyle::Stroke, DIAL_STROKE_WIDTH),
            label: Paint::new(Color::BLACK, PaintStyle::Fill, DIAL_STROKE_WIDTH)
                .with_text_size(LABEL_TEXT_SIZE),
            center_dot: Paint::new(Color::BLACK, PaintStyle::Fill, DIAL_STROKE_WIDTH),
            hour: Paint::new(style.hour_line_color, PaintStyle::Fill, HOUR_STROKE_WIDTH),
            minute: Paint::new(style.minute_line_color, PaintStyle::Fill, MINUTE_STROKE_WIDTH),
            second: Paint::new(style.second_line_color, PaintStyle::Fill, SECOND_STROKE_WIDTH),
        }
    }

    pub fn hand(&self, hand: Hand) -> &Paint {
        match hand {
            Hand::Hour => &self.hour,
            Hand::Minute => &self.minute,
            Hand::Second => &self.second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_paints_take_colors_from_style() {
        let style = DialStyle::builder()
            .hour_line_color(Color::new(0xff, 0x00, 0x00))
            .minute_line_color(Color::new(0x00, 0xff, 0x00))
            .second_line_color(Color::new(0x00, 0x00, 0xff))
            .build();
        let tools = DrawingTools::from_style(&style);

        assert_eq!(tools.hand(Hand::Hour).color, style.hour_line_color);
        assert_eq!(tools.hand(Hand::Minute).color, style.minute_line_color);
        assert_eq!(tools.hand(Hand::Second).color, style.second_line_color);
    }

    #[test]
    fn stroke_widths_ignore_style_hand_widths() {
        let style = DialStyle::builder()
            .hour_line_width(30.0)
            .minute_line_width(20.0)
            .second_line_width(10.0)
            .build();
        let tools = DrawingTools::from_style(&style);

        assert_eq!(tools.hour.stroke_width, 5.0);
        assert_eq!(tools.minute.stroke_width, 2.0);
        assert_eq!(tools.second.stroke_width, 1.0);
    }

    #[test]
    fn fixed_tools_are_black_and_anti_aliased() {
        let tools = DrawingTools::from_style(&DialStyle::default());

        assert_eq!(tools.dial.style, PaintStyle::Stroke);
        assert_eq!(tools.label.text_size, 40.0);
        for paint in [
            tools.dial,
            tools.label,
            tools.center_dot,
            tools.hour,
            tools.minute,
            tools.second,
        ] {
            assert!(paint.anti_alias);
            assert_eq!(paint.color, Color::BLACK);
        }
    }
}
