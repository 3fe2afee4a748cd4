// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Wrapline: greedy word-wrap text layout
//!
//! Given a text, a [`Font`](fonts::Font) reporting per-character metrics and
//! a bounding box, [`TextLayout`] computes where line breaks fall, how wide
//! each wrapped line is, where each line starts under an alignment policy and
//! how tall each line is above its baseline. Rendering, shaping and font
//! rasterization are out of scope: the font is consumed only through a narrow
//! metrics capability.
//!
//! ```
//! use wrapline::fonts::Font;
//! use wrapline::{Align, GlyphMetrics, TextLayout, Vec2};
//!
//! struct Fixed;
//! impl Font for Fixed {
//!     fn metrics(&self, _: char) -> GlyphMetrics {
//!         GlyphMetrics { advance: Vec2(8.0, 0.0), bearing: Vec2::ZERO }
//!     }
//!     fn glyph_height(&self, c: char) -> f32 {
//!         if c == ' ' { 0.0 } else { 10.0 }
//!     }
//! }
//!
//! let font = Fixed;
//! let layout = TextLayout::new(&font, "greedy word wrap", Vec2(90.0, 40.0), Align::Left);
//! for line in layout.lines() {
//!     println!("{:?}: width {}", line.range(), line.width);
//! }
//! ```

mod conv;
pub use conv::DPU;

mod data;
pub use data::*;

pub mod fonts;

mod layout;
pub use layout::{Line, Lines, TextLayout};
