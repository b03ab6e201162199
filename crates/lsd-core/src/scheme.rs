//! Semantic model of a level scheme.
//!
//! A [`LevelScheme`] owns an arena of [`Level`]s and a list of
//! [`Transition`]s that refer back into the arena through [`LevelId`]s.
//! Levels are identified by their energy: two levels with exactly the same
//! energy are the same level, and the first one registered wins.
//!
//! # Example
//!
//! ```
//! # use lsd_core::scheme::{Level, LevelScheme, Transition};
//! let mut scheme = LevelScheme::new();
//!
//! let parent = scheme.add_level(Level::new(1332.5).with_spin(2.0).with_parity(1.0)).unwrap();
//! let daughter = scheme.add_level(Level::new(0.0)).unwrap();
//! scheme.add_transition(Transition::new(parent, daughter).with_gamma(1332.5));
//!
//! assert_eq!(scheme.levels().count(), 2);
//! assert_eq!(scheme.parent_of(&scheme.transitions()[0]).energy(), 1332.5);
//! ```

use std::fmt;

use indexmap::{IndexMap, map::Entry};
use log::trace;
use thiserror::Error;

/// Errors raised while building a [`LevelScheme`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemeError {
    #[error("level energy must be a finite number, got {0}")]
    NonFiniteEnergy(f32),
}

/// Canonical identity of an energy value.
///
/// Energies are compared bit for bit, with `-0.0` folded into `0.0`, so the
/// key never depends on how a number happens to be formatted.
///
/// ```
/// # use lsd_core::scheme::EnergyKey;
/// assert_eq!(EnergyKey::new(0.0), EnergyKey::new(-0.0));
/// assert_ne!(EnergyKey::new(10.0), EnergyKey::new(10.000001));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnergyKey(u32);

impl EnergyKey {
    pub fn new(energy: f32) -> Self {
        let energy = if energy == 0.0 { 0.0 } else { energy };
        Self(energy.to_bits())
    }

    /// Returns the energy this key was built from
    pub fn energy(self) -> f32 {
        f32::from_bits(self.0)
    }
}

impl From<f32> for EnergyKey {
    fn from(energy: f32) -> Self {
        Self::new(energy)
    }
}

impl fmt::Display for EnergyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.energy())
    }
}

/// A discrete energy state, drawn as a horizontal bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    energy: f32,
    spin: Option<f32>,
    parity: Option<f32>,
}

impl Level {
    /// Creates a level with no spin or parity.
    pub fn new(energy: f32) -> Self {
        Self {
            energy,
            spin: None,
            parity: None,
        }
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = Some(spin);
        self
    }

    pub fn with_parity(mut self, parity: f32) -> Self {
        self.parity = Some(parity);
        self
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn spin(&self) -> Option<f32> {
        self.spin
    }

    pub fn parity(&self) -> Option<f32> {
        self.parity
    }

    pub fn key(&self) -> EnergyKey {
        EnergyKey::new(self.energy)
    }

    /// Text naming the level, its energy.
    pub fn name_label(&self) -> String {
        self.energy.to_string()
    }

    /// Spin followed by parity, each omitted when missing.
    ///
    /// ```
    /// # use lsd_core::scheme::Level;
    /// assert_eq!(Level::new(100.0).with_spin(1.5).with_parity(-1.0).spin_parity_label(), "1.5-1");
    /// assert_eq!(Level::new(100.0).with_parity(1.0).spin_parity_label(), "1");
    /// assert_eq!(Level::new(100.0).spin_parity_label(), "");
    /// ```
    pub fn spin_parity_label(&self) -> String {
        let spin = self.spin.map(|spin| spin.to_string()).unwrap_or_default();
        let parity = self
            .parity
            .map(|parity| parity.to_string())
            .unwrap_or_default();
        format!("{spin}{parity}")
    }
}

/// Index of a level inside its [`LevelScheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(usize);

/// A directed decay from a parent level to a daughter level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    parent: LevelId,
    daughter: LevelId,
    gamma: Option<f32>,
    branching_ratio: Option<f32>,
}

impl Transition {
    pub fn new(parent: LevelId, daughter: LevelId) -> Self {
        Self {
            parent,
            daughter,
            gamma: None,
            branching_ratio: None,
        }
    }

    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn with_branching_ratio(mut self, branching_ratio: f32) -> Self {
        self.branching_ratio = Some(branching_ratio);
        self
    }

    pub fn parent(&self) -> LevelId {
        self.parent
    }

    pub fn daughter(&self) -> LevelId {
        self.daughter
    }

    /// Gamma-ray energy, if given
    pub fn gamma(&self) -> Option<f32> {
        self.gamma
    }

    pub fn branching_ratio(&self) -> Option<f32> {
        self.branching_ratio
    }
}

/// Levels and transitions of one diagram.
///
/// Levels keep the order in which they were first registered.
#[derive(Debug, Clone, Default)]
pub struct LevelScheme {
    levels: IndexMap<EnergyKey, Level>,
    transitions: Vec<Transition>,
}

impl LevelScheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a level and returns its id.
    ///
    /// A level whose energy is already registered is not added again; the id
    /// of the existing level is returned and the first level's spin and
    /// parity are kept.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError::NonFiniteEnergy`] for NaN or infinite energies.
    pub fn add_level(&mut self, level: Level) -> Result<LevelId, SchemeError> {
        if !level.energy().is_finite() {
            return Err(SchemeError::NonFiniteEnergy(level.energy()));
        }

        let entry = self.levels.entry(level.key());
        let index = entry.index();
        match entry {
            Entry::Occupied(_) => {
                trace!(energy = level.energy(); "Level already registered");
            }
            Entry::Vacant(vacant) => {
                vacant.insert(level);
            }
        }
        Ok(LevelId(index))
    }

    pub fn add_transition(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Iterates the levels in registration order.
    pub fn levels(&self) -> impl ExactSizeIterator<Item = &Level> {
        self.levels.values()
    }

    /// Iterates the levels together with their ids.
    pub fn levels_with_ids(&self) -> impl Iterator<Item = (LevelId, &Level)> {
        self.levels
            .values()
            .enumerate()
            .map(|(index, level)| (LevelId(index), level))
    }

    /// Energies of all levels, in registration order.
    pub fn energies(&self) -> Vec<f32> {
        self.levels.values().map(Level::energy).collect()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the level with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id was issued by a different scheme.
    pub fn level(&self, id: LevelId) -> &Level {
        &self.levels[id.0]
    }

    pub fn find_level(&self, key: EnergyKey) -> Option<(LevelId, &Level)> {
        self.levels
            .get_full(&key)
            .map(|(index, _, level)| (LevelId(index), level))
    }

    pub fn parent_of(&self, transition: &Transition) -> &Level {
        self.level(transition.parent())
    }

    pub fn daughter_of(&self, transition: &Transition) -> &Level {
        self.level(transition.daughter())
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_add_level_deduplicates_by_energy() {
        let mut scheme = LevelScheme::new();

        let first = scheme.add_level(Level::new(100.0).with_spin(2.0)).unwrap();
        let other = scheme.add_level(Level::new(50.0)).unwrap();
        let again = scheme.add_level(Level::new(100.0).with_spin(4.0)).unwrap();

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(scheme.levels().len(), 2);
        assert_eq!(scheme.level(first).spin(), Some(2.0));
    }

    #[test]
    fn test_add_level_rejects_non_finite() {
        let mut scheme = LevelScheme::new();

        assert_eq!(
            scheme.add_level(Level::new(f32::INFINITY)),
            Err(SchemeError::NonFiniteEnergy(f32::INFINITY))
        );
        assert!(scheme.add_level(Level::new(f32::NAN)).is_err());
        assert!(scheme.is_empty());
    }

    #[test]
    fn test_levels_keep_registration_order() {
        let mut scheme = LevelScheme::new();
        for energy in [300.0, 0.0, 150.0] {
            scheme.add_level(Level::new(energy)).unwrap();
        }

        assert_eq!(scheme.energies(), vec![300.0, 0.0, 150.0]);
    }

    #[test]
    fn test_transition_back_references() {
        let mut scheme = LevelScheme::new();
        let parent = scheme.add_level(Level::new(661.7)).unwrap();
        let daughter = scheme.add_level(Level::new(0.0)).unwrap();
        scheme.add_transition(
            Transition::new(parent, daughter)
                .with_gamma(661.7)
                .with_branching_ratio(0.85),
        );

        let transition = &scheme.transitions()[0];
        assert_approx_eq!(f32, scheme.parent_of(transition).energy(), 661.7);
        assert_approx_eq!(f32, scheme.daughter_of(transition).energy(), 0.0);
        assert_eq!(transition.branching_ratio(), Some(0.85));
    }

    #[test]
    fn test_find_level_by_key() {
        let mut scheme = LevelScheme::new();
        let id = scheme.add_level(Level::new(-0.0)).unwrap();

        let (found, level) = scheme.find_level(EnergyKey::new(0.0)).unwrap();
        assert_eq!(found, id);
        assert_eq!(level.energy(), 0.0);
        assert!(scheme.find_level(EnergyKey::new(1.0)).is_none());
    }

    proptest! {
        #[test]
        fn energy_key_round_trips(energy in -1.0e6f32..1.0e6) {
            prop_assume!(energy != 0.0);
            prop_assert_eq!(EnergyKey::new(energy).energy(), energy);
        }
    }
}
