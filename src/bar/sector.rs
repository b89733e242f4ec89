//! Sectors - the single rendered units of a progressbar

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single rendered unit of a progressbar
///
/// The position is assigned when the sector is created and never changes.
/// The glyph is mutable so post-execution hooks can swap it in place.
pub trait Sector: fmt::Debug {
    /// Glyph currently displayed for this sector
    fn glyph(&self) -> &str;

    /// Replace the displayed glyph
    fn set_glyph(&mut self, glyph: String);

    /// Whether this sector represents completed progress
    fn is_filled(&self) -> bool;

    /// Ordinal position inside the owning progressbar
    fn position(&self) -> usize;
}

/// Produces sectors of a concrete type for a writer
pub trait SectorFactory {
    /// Sector type this factory creates
    type Sector: Sector;

    /// Create a sector with the given glyph, fill state and position
    fn create_sector(&self, glyph: &str, is_filled: bool, position: usize) -> Self::Sector;
}

/// Default sector implementation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarSector {
    glyph: String,
    is_filled: bool,
    position: usize,
}

impl BarSector {
    /// Create a new sector
    pub fn new(glyph: impl Into<String>, is_filled: bool, position: usize) -> Self {
        Self {
            glyph: glyph.into(),
            is_filled,
            position,
        }
    }
}

impl Sector for BarSector {
    fn glyph(&self) -> &str {
        &self.glyph
    }

    fn set_glyph(&mut self, glyph: String) {
        debug!(position = %self.position, %glyph, "BarSector::set_glyph: called");
        self.glyph = glyph;
    }

    fn is_filled(&self) -> bool {
        self.is_filled
    }

    fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for BarSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glyph)
    }
}

/// Factory for [`BarSector`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BarSectorFactory;

impl SectorFactory for BarSectorFactory {
    type Sector = BarSector;

    fn create_sector(&self, glyph: &str, is_filled: bool, position: usize) -> BarSector {
        BarSector::new(glyph, is_filled, position)
    }
}
