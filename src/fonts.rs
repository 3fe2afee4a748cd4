// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font capabilities
//!
//! Layout consumes fonts only through the [`Font`] trait: per-character
//! advance and vertical metrics. [`FaceFont`] implements this trait over a
//! [`ttf_parser::Face`]; [`FontData`] owns font file data and can locate a
//! face among the system fonts.
//!
//! ### Units
//!
//! Font files define glyph geometry in *font units*. A [`FaceFont`] is
//! constructed at a fixed scale given in `dpem` (dots per Em, i.e. the pixel
//! width of an 'M'), from which a [`DPU`](crate::DPU) (pixels per font unit)
//! conversion factor is derived:
//!
//! ```none
//! dpu = dpem / units_per_em
//! ```

use crate::conv::DPU;
use crate::{GlyphMetrics, Vec2};
use log::{debug, info};
use std::sync::Arc;
use thiserror::Error;
use ttf_parser::{Face, GlyphId};

/// Per-character metric source consumed by layout
///
/// Implementations must answer deterministically for any character of the
/// laid-out text. Behaviour for unsupported characters is the implementation's
/// contract: it may substitute a fallback glyph or report zero metrics, but
/// the layout core never masks or retries a lookup.
///
/// All methods take `&self`: a `Font` may be shared between layouts and
/// queried concurrently if the implementation permits it.
pub trait Font {
    /// Metrics for the glyph representing `c`
    fn metrics(&self, c: char) -> GlyphMetrics;

    /// Height of the visual bounds of the glyph representing `c`
    ///
    /// Characters without an outline (e.g. a space) report 0.
    fn glyph_height(&self, c: char) -> f32;
}

/// Font face parsing failure
#[derive(Error, Debug)]
#[error("face load error")]
pub struct FaceError(#[from] ttf_parser::FaceParsingError);

/// No matching face found
///
/// Font discovery failed.
#[derive(Error, Debug)]
#[error("no face match")]
pub struct NoFaceMatch;

/// A font face at a fixed scale
///
/// This borrows the font file data it was parsed from and implements [`Font`]
/// with metrics scaled to the `dpem` given at construction.
#[derive(Clone)]
pub struct FaceFont<'a> {
    face: Face<'a>,
    dpu: DPU,
}

impl<'a> FaceFont<'a> {
    /// Parse face number `index` of font file `data`
    ///
    /// Metrics are scaled to `dpem` pixels per Em.
    pub fn new(data: &'a [u8], index: u32, dpem: f32) -> Result<Self, FaceError> {
        let face = Face::parse(data, index)?;
        let dpu = DPU(dpem / f32::from(face.units_per_em()));
        Ok(FaceFont { face, dpu })
    }

    /// Scale: pixels per font unit
    #[inline]
    pub fn dpu(&self) -> DPU {
        self.dpu
    }

    fn glyph(&self, c: char) -> GlyphId {
        // GlyphId 0 is required to be a special glyph representing a missing
        // character (see cmap table / TrueType specification).
        self.face.glyph_index(c).unwrap_or(GlyphId(0))
    }
}

impl<'a> Font for FaceFont<'a> {
    fn metrics(&self, c: char) -> GlyphMetrics {
        let id = self.glyph(c);
        let advance = self.face.glyph_hor_advance(id).unwrap_or(0);
        let bearing = match self.face.glyph_bounding_box(id) {
            Some(rect) => Vec2(
                self.dpu.i16_to_px(rect.x_min),
                self.dpu.i16_to_px(rect.y_min),
            ),
            None => Vec2::ZERO,
        };
        GlyphMetrics {
            advance: Vec2(self.dpu.u16_to_px(advance), 0.0),
            bearing,
        }
    }

    fn glyph_height(&self, c: char) -> f32 {
        match self.face.glyph_bounding_box(self.glyph(c)) {
            Some(rect) => self.dpu.i16_to_px(rect.height()),
            None => 0.0,
        }
    }
}

/// Owned font file data
///
/// [`FaceFont`] borrows the file data it is parsed from; this type owns that
/// data (shared, reference-counted) together with a face index, so faces at
/// any scale may be parsed from it.
#[derive(Clone)]
pub struct FontData {
    data: Arc<dyn AsRef<[u8]> + Send + Sync>,
    index: u32,
}

impl FontData {
    /// Construct from raw font file data
    pub fn new(data: Vec<u8>, index: u32) -> Self {
        FontData {
            data: Arc::new(data),
            index,
        }
    }

    /// Load the first system face matching `families`
    ///
    /// Families are tried in order; e.g.
    /// `&[Family::Name("DejaVu Sans"), Family::SansSerif]`.
    pub fn load_system(families: &[fontdb::Family]) -> Result<Self, NoFaceMatch> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        info!("Found {} fonts", db.len());

        let query = fontdb::Query {
            families,
            ..Default::default()
        };
        let id = db.query(&query).ok_or(NoFaceMatch)?;
        let face = db.face(id).ok_or(NoFaceMatch)?;
        debug!("match: {}", face.post_script_name);

        let index = face.index;
        let data: Arc<dyn AsRef<[u8]> + Send + Sync> = match &face.source {
            fontdb::Source::Binary(data) => data.clone(),
            fontdb::Source::SharedFile(_, data) => data.clone(),
            fontdb::Source::File(path) => {
                let data = std::fs::read(path).map_err(|err| {
                    log::error!("Failed to load font: {err}");
                    NoFaceMatch
                })?;
                Arc::new(data)
            }
        };
        Ok(FontData { data, index })
    }

    /// Parse a face scaled to `dpem` pixels per Em
    pub fn face(&self, dpem: f32) -> Result<FaceFont<'_>, FaceError> {
        FaceFont::new((*self.data).as_ref(), self.index, dpem)
    }
}
