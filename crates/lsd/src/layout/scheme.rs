use log::{debug, info, trace};

use lsd_core::scheme::{Level, LevelId, LevelScheme, Transition};

use super::{LayoutError, SpaceManager};
use crate::config::{LayoutConfig, StyleConfig, TransitionOrder};

/// A level with its display position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLevel {
    id: LevelId,
    level: Level,
    y: f32,
    height: f32,
}

impl PositionedLevel {
    pub fn id(&self) -> LevelId {
        self.id
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Display y of the level bar, in energy units.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Kink height the level bar is drawn with.
    pub fn height(&self) -> f32 {
        self.height
    }
}

/// A transition with its lane and end points.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedTransition {
    transition: Transition,
    x: f32,
    parent_y: f32,
    daughter_y: f32,
    width_scale: f32,
}

impl RoutedTransition {
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Lane x, in relative units.
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn parent_y(&self) -> f32 {
        self.parent_y
    }

    pub fn daughter_y(&self) -> f32 {
        self.daughter_y
    }

    /// Factor applied to the arrow stroke width.
    pub fn width_scale(&self) -> f32 {
        self.width_scale
    }
}

/// Positions of every level and transition of one scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeLayout {
    levels: Vec<PositionedLevel>,
    transitions: Vec<RoutedTransition>,
}

impl SchemeLayout {
    /// Lays out a scheme.
    ///
    /// Levels keep the scheme's order. Transitions are returned in the order
    /// they claimed their lanes, which is the draw order.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when the configured lanes are unusable or a
    /// transition refers to a level the scheme does not hold.
    pub fn compute(
        scheme: &LevelScheme,
        layout: &LayoutConfig,
        style: &StyleConfig,
    ) -> Result<Self, LayoutError> {
        let reverse = style.level_style().is_reversed();
        let lanes = layout.lanes();
        let mut space = SpaceManager::new(&lanes, &scheme.energies(), layout.spacing(), reverse)?;

        info!(
            levels = scheme.levels().len(),
            transitions = scheme.transitions().len(),
            style = style.level_style().name(),
            reverse;
            "Laying out scheme"
        );

        let levels = scheme
            .levels_with_ids()
            .map(|(id, level)| {
                let spaced = space.get_spaced_y(level.energy())?;
                let positioned = if layout.proportional() {
                    PositionedLevel {
                        id,
                        level: *level,
                        y: level.energy(),
                        height: style.level_height() + (spaced - level.energy()).abs(),
                    }
                } else {
                    PositionedLevel {
                        id,
                        level: *level,
                        y: spaced,
                        height: style.level_height(),
                    }
                };
                trace!(
                    energy = level.energy(),
                    y = positioned.y,
                    height = positioned.height;
                    "Positioned level"
                );
                Ok(positioned)
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        let mut ordered: Vec<&Transition> = scheme.transitions().iter().collect();
        if layout.transition_order() == TransitionOrder::ParentEnergy {
            ordered.sort_by(|a, b| {
                scheme
                    .parent_of(a)
                    .energy()
                    .total_cmp(&scheme.parent_of(b).energy())
            });
        }

        let mut transitions = Vec::with_capacity(ordered.len());
        for (index, transition) in ordered.into_iter().enumerate() {
            let parent = scheme.parent_of(transition).energy();
            let daughter = scheme.daughter_of(transition).energy();

            let x = if layout.auto_route() {
                space.get_path(parent, daughter)?
            } else {
                lanes[(lanes.len() - index % lanes.len()) % lanes.len()]
            };

            let (parent_y, daughter_y) = if layout.proportional() {
                (parent, daughter)
            } else {
                (space.get_spaced_y(parent)?, space.get_spaced_y(daughter)?)
            };

            let width_scale = match transition.branching_ratio() {
                Some(ratio) if layout.branching_widths() => 1.0 + ratio,
                _ => 1.0,
            };

            trace!(parent, daughter, x, width_scale; "Routed transition");
            transitions.push(RoutedTransition {
                transition: *transition,
                x,
                parent_y,
                daughter_y,
                width_scale,
            });
        }

        debug!(levels = levels.len(), transitions = transitions.len(); "Scheme layout done");

        Ok(Self {
            levels,
            transitions,
        })
    }

    pub fn levels(&self) -> &[PositionedLevel] {
        &self.levels
    }

    /// Routed transitions in draw order.
    pub fn transitions(&self) -> &[RoutedTransition] {
        &self.transitions
    }
}
