use std::path::{Path, PathBuf};

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::error::{ClockError, ClockResult};

/// Fonts probed when the configuration does not name one.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Ink box of a rendered string, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
}

/// Measures label text before the frame is laid out.
pub trait TextMeasure {
    fn text_bounds(&self, text: &str, size: f32) -> TextBounds;
}

/// Font used for the hour labels.
pub struct LabelFont {
    font: Font<'static>,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl LabelFont {
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(data).map(|font| Self { font })
    }

    pub fn from_path(path: &Path) -> ClockResult<Self> {
        let data = std::fs::read(path).map_err(|err| ClockError::Font {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::from_bytes(data).ok_or_else(|| ClockError::Font {
            path: path.to_path_buf(),
            reason: "not a TrueType or OpenType font".to_string(),
        })
    }

    /// Loads `configured` if given, otherwise the first usable system font.
    pub fn discover(configured: Option<&Path>) -> ClockResult<Option<Self>> {
        if let Some(path) = configured {
            tracing::info!(?path, "loading label font");
            return Self::from_path(path).map(Some);
        }

        for candidate in SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from) {
            if !candidate.exists() {
                continue;
            }
            match Self::from_path(&candidate) {
                Ok(font) => {
                    tracing::info!(path = ?candidate, "using system label font");
                    return Ok(Some(font));
                }
                Err(err) => tracing::debug!(%err, "skipping font candidate"),
            }
        }
        Ok(None)
    }

    /// Lays out `text` with its ascent at the origin, returning the glyphs and
    /// their combined pixel bounding box as `(min_x, min_y, max_x, max_y)`.
    pub(crate) fn layout(
        &self,
        text: &str,
        size: f32,
    ) -> (Vec<PositionedGlyph<'_>>, Option<(i32, i32, i32, i32)>) {
        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        let glyphs: Vec<PositionedGlyph> = self
            .font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .collect();

        let bounds = glyphs
            .iter()
            .filter_map(|g| g.pixel_bounding_box())
            .fold(None, |acc: Option<(i32, i32, i32, i32)>, bb| {
                Some(match acc {
                    None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                    Some((min_x, min_y, max_x, max_y)) => (
                        min_x.min(bb.min.x),
                        min_y.min(bb.min.y),
                        max_x.max(bb.max.x),
                        max_y.max(bb.max.y),
                    ),
                })
            });
        (glyphs, bounds)
    }
}

impl TextMeasure for LabelFont {
    fn text_bounds(&self, text: &str, size: f32) -> TextBounds {
        match self.layout(text, size).1 {
            Some((min_x, min_y, max_x, max_y)) => TextBounds {
                width: (max_x - min_x) as f32,
                height: (max_y - min_y) as f32,
            },
            None => TextBounds::default(),
        }
    }
}
