//! Stand-in image rendering for Storyloom.
//!
//! Produces fixed-size JPEG images labeled with a scene number, used for
//! failure backfill and for offline development runs. Rendering needs no
//! fonts or files on disk: text is drawn from an embedded 8x8 bitmap font.
//!
//! # Example
//!
//! ```
//! use storyloom_render::PlaceholderRenderer;
//!
//! let renderer = PlaceholderRenderer::new();
//! let jpeg = renderer.render_failure(3);
//! assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod canvas;
mod placeholder;

pub use canvas::wrap_words;
pub use placeholder::{
    CANVAS_SIZE, FAILURE_LABEL, PlaceholderRenderer, WRAP_WIDTH,
};
