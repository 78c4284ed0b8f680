//! Placeholder and offline scene-card images.

use crate::canvas::{GLYPH_SIZE, draw_text, wrap_words};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use storyloom_error::RenderError;
use tracing::debug;

/// Width and height of rendered images, in pixels.
pub const CANVAS_SIZE: u32 = 512;

/// Characters per line when wrapping descriptors.
pub const WRAP_WIDTH: usize = 40;

/// Status label drawn on failure placeholders.
pub const FAILURE_LABEL: &str = "Image Generation Failed";

const MARGIN: u32 = 20;
const LINE_HEIGHT: u32 = 20;
const HEADER_SCALE: u32 = 2;
const BODY_SCALE: u32 = 1;
const BODY_TOP: u32 = 50;

const LIGHT_GRAY: Rgb<u8> = Rgb([211, 211, 211]);
const LIGHT_BLUE: Rgb<u8> = Rgb([173, 216, 230]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Renders labeled stand-in images.
///
/// Every entry point is pure and deterministic for a given input.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderRenderer {
    size: u32,
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderRenderer {
    /// Renderer producing [`CANVAS_SIZE`]-pixel square images.
    pub fn new() -> Self {
        Self { size: CANVAS_SIZE }
    }

    /// Light-gray image reading `Scene <n> - <reason_label>`.
    ///
    /// # Panics
    ///
    /// Panics if encoding the in-memory canvas fails, which indicates a
    /// defect in the renderer rather than a runtime condition.
    pub fn render(&self, scene_number: u32, reason_label: &str) -> Vec<u8> {
        self.try_render(scene_number, reason_label)
            .expect("Placeholder rendering of a fixed-size canvas cannot fail")
    }

    /// Placeholder for a scene whose generation did not complete.
    ///
    /// # Panics
    ///
    /// See [`PlaceholderRenderer::render`].
    pub fn render_failure(&self, scene_number: u32) -> Vec<u8> {
        self.render(scene_number, FAILURE_LABEL)
    }

    /// Light-blue card with the scene number and the word-wrapped descriptor,
    /// used as offline stand-in for a generated image.
    ///
    /// # Panics
    ///
    /// See [`PlaceholderRenderer::render`].
    pub fn render_scene_card(&self, scene_number: u32, descriptor: &str) -> Vec<u8> {
        self.try_render_scene_card(scene_number, descriptor)
            .expect("Scene card rendering of a fixed-size canvas cannot fail")
    }

    /// Fallible form of [`PlaceholderRenderer::render`].
    pub fn try_render(&self, scene_number: u32, reason_label: &str) -> Result<Vec<u8>, RenderError> {
        let mut canvas = RgbImage::from_pixel(self.size, self.size, LIGHT_GRAY);
        let header = format!("Scene {scene_number}");
        let header_width = header.chars().count() as u32 * GLYPH_SIZE * HEADER_SCALE;
        let center_y = self.size / 2;

        draw_text(
            &mut canvas,
            self.size.saturating_sub(header_width) / 2,
            center_y.saturating_sub(LINE_HEIGHT * 2),
            &header,
            HEADER_SCALE,
            BLACK,
        );

        let label = format!("- {reason_label}");
        for (i, line) in self.wrap_to_canvas(&label).iter().enumerate() {
            let line_width = line.chars().count() as u32 * GLYPH_SIZE * BODY_SCALE;
            draw_text(
                &mut canvas,
                self.size.saturating_sub(line_width) / 2,
                center_y + i as u32 * LINE_HEIGHT,
                line,
                BODY_SCALE,
                BLACK,
            );
        }

        debug!(scene_number, label = reason_label, "Rendered placeholder");
        encode(&canvas)
    }

    /// Fallible form of [`PlaceholderRenderer::render_scene_card`].
    pub fn try_render_scene_card(
        &self,
        scene_number: u32,
        descriptor: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let mut canvas = RgbImage::from_pixel(self.size, self.size, LIGHT_BLUE);

        draw_text(
            &mut canvas,
            MARGIN,
            MARGIN,
            &format!("Scene {scene_number}"),
            HEADER_SCALE,
            BLACK,
        );

        let max_lines = (self.size.saturating_sub(BODY_TOP + MARGIN) / LINE_HEIGHT) as usize;
        let mut lines = self.wrap_to_canvas(descriptor);
        if lines.len() > max_lines {
            lines.truncate(max_lines);
            if let Some(last) = lines.last_mut() {
                last.push_str("...");
            }
        }

        for (i, line) in lines.iter().enumerate() {
            draw_text(
                &mut canvas,
                MARGIN,
                BODY_TOP + i as u32 * LINE_HEIGHT,
                line,
                BODY_SCALE,
                BLACK,
            );
        }

        debug!(scene_number, lines = lines.len(), "Rendered scene card");
        encode(&canvas)
    }

    fn wrap_to_canvas(&self, text: &str) -> Vec<String> {
        let fits = ((self.size - 2 * MARGIN) / (GLYPH_SIZE * BODY_SCALE)) as usize;
        wrap_words(text, WRAP_WIDTH.min(fits))
    }
}

fn encode(canvas: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Cursor::new(Vec::new());
    canvas
        .write_to(&mut bytes, ImageFormat::Jpeg)
        .map_err(|e| RenderError::new(format!("JPEG encoding failed: {}", e)))?;
    Ok(bytes.into_inner())
}
