//! Sectors and the containers that hold them

mod progressbar;
mod sector;

pub use progressbar::{Progressbar, ProgressbarFactory, SectorContainer, VecProgressbarFactory, resolve_index};
pub use sector::{BarSector, BarSectorFactory, Sector, SectorFactory};
