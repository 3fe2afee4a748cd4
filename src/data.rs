// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple data types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two-component vector
///
/// Usually this represents a position or size in pixels, with `x` to the right
/// and `y` downwards (`y` upwards for font metrics relative to a baseline).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);

    /// Positive infinity (implying no bounds)
    pub const INFINITY: Vec2 = Vec2(f32::INFINITY, f32::INFINITY);
}

impl From<(f32, f32)> for Vec2 {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Vec2(x, y)
    }
}

/// Horizontal alignment of lines
///
/// Alignment only moves lines within the available width; it does not affect
/// where lines break.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Align {
    /// Align to the left edge
    #[default]
    Left,
    /// Align to the centre
    Centre,
    /// Align to the right edge
    Right,
}

/// Metrics for a single glyph
///
/// All fields are in pixels and are read-only, font-owned values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Pen displacement caused by the character
    ///
    /// Only the horizontal component is used by line layout.
    pub advance: Vec2,
    /// Offset from the pen position to the glyph's visual bounds
    ///
    /// The vertical component is measured from the baseline to the *bottom*
    /// edge of the bounds (negative for descenders), such that
    /// `glyph_height + bearing.1` is the glyph's extent above the baseline.
    pub bearing: Vec2,
}
