//! Level spacing and lane allocation.
//!
//! A [`SpaceManager`] is built once per diagram. It sorts the level
//! energies into rows, spreads over-close rows apart using the regions from
//! [`normalize_regions`], and keeps a claim-only occupancy grid of rows ×
//! lanes that transition routing draws from.
//!
//! ```
//! # use lsd::layout::SpaceManager;
//! let mut space = SpaceManager::new(&[0.2, 0.4, 0.6, 0.8], &[0.0, 10.0, 12.0, 100.0], Some(20.0), false)?;
//!
//! assert_eq!(space.get_spaced_y(0.0)?, 0.0);
//! assert_eq!(space.get_spaced_y(10.0)?, 9.0);
//!
//! // The right-most free lane wins
//! assert_eq!(space.get_path(100.0, 0.0)?, 0.8);
//! assert_eq!(space.get_path(100.0, 0.0)?, 0.6);
//! # Ok::<(), lsd::layout::LayoutError>(())
//! ```

use std::{
    collections::HashMap,
    ops::{Range, RangeInclusive},
};

use log::{debug, trace, warn};

use lsd_core::scheme::EnergyKey;

use super::{LayoutError, regions::normalize_regions};

/// Dense row-major occupancy grid.
///
/// Cells are only ever claimed, never released.
#[derive(Debug, Clone)]
struct OccupancyGrid {
    lanes: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    fn new(rows: usize, lanes: usize) -> Self {
        Self {
            lanes,
            cells: vec![false; rows * lanes],
        }
    }

    fn is_free(&self, lane: usize, rows: RangeInclusive<usize>) -> bool {
        rows.into_iter().all(|row| !self.cells[row * self.lanes + lane])
    }

    fn claim(&mut self, lane: usize, rows: Range<usize>) {
        for row in rows {
            self.cells[row * self.lanes + lane] = true;
        }
    }
}

/// Owner of level rows, their spaced positions and the lane grid.
#[derive(Debug, Clone)]
pub struct SpaceManager {
    lanes: Vec<f32>,
    rows: HashMap<EnergyKey, usize>,
    spaced_y: Vec<f32>,
    grid: OccupancyGrid,
}

impl SpaceManager {
    /// Builds the manager for one diagram.
    ///
    /// `lanes` are the candidate x positions of transition arrows, from left
    /// to right. `levels` need not be sorted; equal energies share a row.
    /// With `spacing` set, clusters of levels closer than `spacing` are
    /// spread apart; `reverse` spreads them from the top down. Without it
    /// every level keeps its energy as display y.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NoLanes`] for an empty lane list,
    /// [`LayoutError::InvalidLane`] for a non-finite lane and
    /// [`LayoutError::NonFiniteEnergy`] for a non-finite level energy.
    pub fn new(
        lanes: &[f32],
        levels: &[f32],
        spacing: Option<f32>,
        reverse: bool,
    ) -> Result<Self, LayoutError> {
        if lanes.is_empty() {
            return Err(LayoutError::NoLanes);
        }
        if let Some(&lane) = lanes.iter().find(|lane| !lane.is_finite()) {
            return Err(LayoutError::InvalidLane(lane));
        }
        if let Some(&energy) = levels.iter().find(|energy| !energy.is_finite()) {
            return Err(LayoutError::NonFiniteEnergy(energy));
        }

        let mut sorted: Vec<f32> = levels
            .iter()
            .map(|&energy| EnergyKey::new(energy).energy())
            .collect();
        sorted.sort_by(f32::total_cmp);
        sorted.dedup();

        let rows = sorted
            .iter()
            .enumerate()
            .map(|(row, &energy)| (EnergyKey::new(energy), row))
            .collect();

        let mut spaced_y = sorted.clone();
        if let Some(spacing) = spacing {
            Self::make_room(&sorted, &mut spaced_y, spacing, reverse);
        }

        debug!(
            rows = sorted.len(),
            lanes = lanes.len(),
            spacing:? = spacing,
            reverse;
            "Space manager ready"
        );

        Ok(Self {
            lanes: lanes.to_vec(),
            rows,
            grid: OccupancyGrid::new(sorted.len(), lanes.len()),
            spaced_y,
        })
    }

    /// Spreads the rows of every region evenly across it.
    ///
    /// Rows are walked in scan order, so the anchored end of the region gets
    /// the first row.
    fn make_room(sorted: &[f32], spaced_y: &mut [f32], spacing: f32, reverse: bool) {
        for region in normalize_regions(sorted, spacing, reverse) {
            let mut members: Vec<usize> = (0..sorted.len())
                .filter(|&row| region.contains(sorted[row]))
                .collect();
            if members.is_empty() {
                continue;
            }
            if reverse {
                members.reverse();
            }

            let even = region.width() / members.len() as f32;
            for (index, &row) in members.iter().enumerate() {
                spaced_y[row] = if reverse {
                    region.upper() - even * index as f32
                } else {
                    region.lower() + even * index as f32
                };
                trace!(energy = sorted[row], spaced_y = spaced_y[row]; "Moved level");
            }
        }
    }

    fn row(&self, energy: f32) -> Result<usize, LayoutError> {
        let key = EnergyKey::new(energy);
        self.rows
            .get(&key)
            .copied()
            .ok_or(LayoutError::UnknownLevel(key))
    }

    /// Candidate lane positions, left to right.
    pub fn lanes(&self) -> &[f32] {
        &self.lanes
    }

    /// Returns the display y of a level.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownLevel`] if no level with exactly this
    /// energy was given at construction.
    pub fn get_spaced_y(&self, energy: f32) -> Result<f32, LayoutError> {
        Ok(self.spaced_y[self.row(energy)?])
    }

    /// Routes a transition and returns the x of its lane.
    ///
    /// Lanes are tried from the right-most inward; the first lane whose cells
    /// are free on every row between the two levels, both included, is
    /// claimed and returned. The claim leaves the upper row free, so arrows
    /// that continue from the same level can stack in one lane. A transition
    /// from a level to itself claims that level's row. When no lane is free
    /// the right-most lane is returned without claiming anything.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownLevel`] if either energy is unknown.
    pub fn get_path(&mut self, parent: f32, daughter: f32) -> Result<f32, LayoutError> {
        let (a, b) = (self.row(parent)?, self.row(daughter)?);
        let (lo, hi) = (a.min(b), a.max(b));

        for lane in (0..self.lanes.len()).rev() {
            if self.grid.is_free(lane, lo..=hi) {
                let claim = if lo == hi { lo..lo + 1 } else { lo..hi };
                self.grid.claim(lane, claim);
                trace!(parent, daughter, lane; "Claimed lane");
                return Ok(self.lanes[lane]);
            }
        }

        warn!(parent, daughter; "Ran out of space, reusing the right-most lane");
        Ok(self.lanes[self.lanes.len() - 1])
    }
}
