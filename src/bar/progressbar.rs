//! Progressbar containers
//!
//! A progressbar is an ordered, index-addressable sequence of sectors. Writers
//! never name the concrete container: they ask a [`ProgressbarFactory`] for an
//! empty [`SectorContainer`] and push sectors into it, so both the container
//! and its sector type can be swapped without touching the writing algorithm.

use std::fmt;
use std::ops::Index;
use std::slice::SliceIndex;

use tracing::debug;

use super::sector::{BarSector, Sector};
use crate::error::MultibarError;

/// Resolve a possibly negative index against a sequence length
///
/// Non-negative indexes count from the front, negative ones from the back
/// (`-1` is the last element). Returns `None` when out of range.
pub fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        let position = index.unsigned_abs();
        (position < len).then_some(position)
    } else {
        len.checked_sub(index.unsigned_abs())
    }
}

/// Mutable, ordered collection of sectors
pub trait SectorContainer {
    /// Sector type stored in this container
    type Sector: Sector;

    /// Append a sector at the end
    fn add_sector(&mut self, sector: Self::Sector);

    /// All sectors in ordinal order
    fn sectors(&self) -> &[Self::Sector];

    /// All sectors in ordinal order, mutably
    fn sectors_mut(&mut self) -> &mut [Self::Sector];

    /// Number of sectors
    fn len(&self) -> usize {
        self.sectors().len()
    }

    /// Whether the container holds no sectors
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the glyph of the sector at `index` (negative indexes count from the end)
    fn replace_display_name_for(&mut self, index: isize, glyph: &str) -> Result<(), MultibarError> {
        let len = self.len();
        debug!(%index, %len, %glyph, "SectorContainer::replace_display_name_for: called");
        let position = resolve_index(index, len).ok_or(MultibarError::IndexOutOfRange { index, len })?;
        self.sectors_mut()[position].set_glyph(glyph.to_string());
        Ok(())
    }

    /// Concatenate all glyphs in ordinal order
    fn render(&self) -> String {
        self.sectors().iter().map(|s| s.glyph()).collect()
    }
}

/// Produces empty containers for a writer
pub trait ProgressbarFactory<S: Sector> {
    /// Container type this factory creates
    type Progressbar: SectorContainer<Sector = S>;

    /// Create an empty container sized for `capacity` sectors
    fn create_progressbar(&self, capacity: usize) -> Self::Progressbar;
}

/// Default progressbar container backed by a `Vec`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progressbar<S = BarSector> {
    sectors: Vec<S>,
}

impl<S> Progressbar<S> {
    /// Create an empty progressbar
    pub fn new() -> Self {
        Self { sectors: Vec::new() }
    }

    /// Create an empty progressbar with room for `capacity` sectors
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sectors: Vec::with_capacity(capacity),
        }
    }

    /// Build a progressbar from already created sectors
    pub fn from_sectors(sectors: impl IntoIterator<Item = S>) -> Self {
        Self {
            sectors: sectors.into_iter().collect(),
        }
    }

    /// Build a new progressbar by converting every sector
    pub fn map<T, F>(&self, f: F) -> Progressbar<T>
    where
        F: FnMut(&S) -> T,
    {
        debug!(len = %self.sectors.len(), "Progressbar::map: called");
        Progressbar {
            sectors: self.sectors.iter().map(f).collect(),
        }
    }

    /// Pass each sector to `consumer`
    pub fn for_each<F>(&self, consumer: F)
    where
        F: FnMut(&S),
    {
        self.sectors.iter().for_each(consumer);
    }

    /// Iterate over sectors in ordinal order
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.sectors.iter()
    }

    /// Get a sector by index (negative indexes count from the end)
    pub fn get(&self, index: isize) -> Option<&S> {
        resolve_index(index, self.sectors.len()).map(|i| &self.sectors[i])
    }

    /// Get a mutable sector by index (negative indexes count from the end)
    pub fn get_mut(&mut self, index: isize) -> Option<&mut S> {
        resolve_index(index, self.sectors.len()).map(|i| &mut self.sectors[i])
    }

    /// Reverse sector order in place
    pub fn reverse(&mut self) {
        self.sectors.reverse();
    }

    /// Consume the progressbar and return its sectors
    pub fn into_sectors(self) -> Vec<S> {
        self.sectors
    }
}

impl<S: Sector> Progressbar<S> {
    /// Number of filled sectors
    pub fn filled_count(&self) -> usize {
        self.sectors.iter().filter(|s| s.is_filled()).count()
    }

    /// Glyphs of all sectors in ordinal order
    pub fn glyphs(&self) -> Vec<&str> {
        self.sectors.iter().map(|s| s.glyph()).collect()
    }
}

impl<S> Default for Progressbar<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sector> SectorContainer for Progressbar<S> {
    type Sector = S;

    fn add_sector(&mut self, sector: S) {
        self.sectors.push(sector);
    }

    fn sectors(&self) -> &[S] {
        &self.sectors
    }

    fn sectors_mut(&mut self) -> &mut [S] {
        &mut self.sectors
    }
}

impl<S, I: SliceIndex<[S]>> Index<I> for Progressbar<S> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.sectors[index]
    }
}

impl<S> IntoIterator for Progressbar<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.sectors.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a Progressbar<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.sectors.iter()
    }
}

impl<S: Sector> fmt::Display for Progressbar<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sector in &self.sectors {
            f.write_str(sector.glyph())?;
        }
        Ok(())
    }
}

/// Factory for [`Progressbar`]
#[derive(Debug, Clone, Copy, Default)]
pub struct VecProgressbarFactory;

impl<S: Sector> ProgressbarFactory<S> for VecProgressbarFactory {
    type Progressbar = Progressbar<S>;

    fn create_progressbar(&self, capacity: usize) -> Progressbar<S> {
        Progressbar::with_capacity(capacity)
    }
}
