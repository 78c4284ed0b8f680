//! Bitmap text drawing on RGB canvases.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};

/// Glyph cell size of the embedded font, in pixels.
pub(crate) const GLYPH_SIZE: u32 = 8;

/// Draw `text` with its top-left corner at (`x`, `y`), each font pixel
/// scaled to a `scale`×`scale` block. Pixels outside the canvas are clipped.
///
/// Characters the font lacks are drawn as `?`.
pub(crate) fn draw_text(canvas: &mut RgbImage, x: u32, y: u32, text: &str, scale: u32, color: Rgb<u8>) {
    let advance = GLYPH_SIZE * scale;
    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let origin_x = x + i as u32 * advance;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if bits >> col & 1 == 1 {
                    fill_block(
                        canvas,
                        origin_x + col * scale,
                        y + row as u32 * scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }
}

fn fill_block(canvas: &mut RgbImage, x: u32, y: u32, size: u32, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    for dy in 0..size {
        for dx in 0..size {
            let (px, py) = (x + dx, y + dy);
            if px < width && py < height {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

/// Greedy word wrap: a word joins the current line while the line plus the
/// word stays under `width` characters. Words longer than `width` get a line
/// of their own and are not split.
///
/// # Examples
///
/// ```
/// use storyloom_render::wrap_words;
///
/// let lines = wrap_words("a knight in silver armor walking through fog", 20);
/// assert_eq!(lines, vec!["a knight in silver", "armor walking", "through fog"]);
/// ```
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + word.chars().count() >= width {
            lines.push(line.trim_end().to_string());
            line.clear();
        }
        line.push_str(word);
        line.push(' ');
    }

    if !line.is_empty() {
        lines.push(line.trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_empty_text() {
        assert!(wrap_words("", 40).is_empty());
        assert!(wrap_words("   ", 40).is_empty());
    }

    #[test]
    fn wrap_keeps_long_words_whole() {
        let lines = wrap_words("supercalifragilistic fox", 10);
        assert_eq!(lines, vec!["supercalifragilistic", "fox"]);
    }

    #[test]
    fn wrapped_lines_stay_within_width() {
        let text = "The same knight walking through a dense grey fog with a lantern raised high";
        for line in wrap_words(text, 40) {
            assert!(line.chars().count() < 40, "{line:?} too long");
        }
    }

    #[test]
    fn draw_text_marks_pixels() {
        let background = Rgb([255, 255, 255]);
        let ink = Rgb([0, 0, 0]);
        let mut canvas = RgbImage::from_pixel(64, 16, background);

        draw_text(&mut canvas, 0, 0, "H", 1, ink);

        assert!(canvas.pixels().any(|p| *p == ink));
        // Only the first glyph cell is touched.
        for (x, _, p) in canvas.enumerate_pixels() {
            if x >= GLYPH_SIZE {
                assert_eq!(*p, background);
            }
        }
    }

    #[test]
    fn draw_text_clips_at_edges() {
        let mut canvas = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        draw_text(&mut canvas, 6, 6, "WIDE TEXT", 2, Rgb([0, 0, 0]));
        assert_eq!(canvas.dimensions(), (10, 10));
    }
}
