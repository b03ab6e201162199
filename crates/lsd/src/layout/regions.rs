//! Detection of over-close level clusters.
//!
//! [`normalize_regions`] walks sorted level energies and groups levels whose
//! gaps are smaller than the spacing threshold. Each group becomes a
//! [`Region`]: the interval its members are later spread evenly over.
//!
//! ```
//! # use lsd::layout::regions::normalize_regions;
//! // 10 and 12 collide; 0 and 100 bound the sequence and are never grouped
//! let regions = normalize_regions(&[0.0, 10.0, 12.0, 100.0], 20.0, false);
//! assert_eq!(regions.len(), 1);
//! assert_eq!(regions[0].lower(), 9.0);
//! assert_eq!(regions[0].upper(), 50.0);
//! ```

use log::trace;

/// Padding added on the anchored side of every region, in energy units.
const REGION_PAD: f32 = 1.0;

/// An energy interval over which a cluster of close levels is spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    lower: f32,
    upper: f32,
}

impl Region {
    pub fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    pub fn lower(&self) -> f32 {
        self.lower
    }

    pub fn upper(&self) -> f32 {
        self.upper
    }

    pub fn width(&self) -> f32 {
        self.upper - self.lower
    }

    /// Returns true if `energy` lies in the closed interval
    pub fn contains(&self, energy: f32) -> bool {
        self.lower <= energy && energy <= self.upper
    }
}

/// Levels grouped while scanning.
#[derive(Debug)]
struct Cluster {
    min: f32,
    max: f32,
    len: usize,
}

impl Cluster {
    fn new(first: f32, second: f32) -> Self {
        Self {
            min: first.min(second),
            max: first.max(second),
            len: 2,
        }
    }

    fn push(&mut self, energy: f32) {
        self.min = self.min.min(energy);
        self.max = self.max.max(energy);
        self.len += 1;
    }

    fn extent(&self, spacing: f32) -> f32 {
        self.len as f32 * spacing
    }

    /// Distance tolerance for levels that are not adjacent to the cluster.
    fn accepts(&self, energy: f32, spacing: f32, reverse: bool) -> bool {
        let extreme = if reverse { self.max } else { self.min };
        (extreme - energy).abs() < self.extent(spacing)
    }

    fn region(&self, spacing: f32, reverse: bool) -> Region {
        if reverse {
            Region::new(self.max - self.extent(spacing), self.max + REGION_PAD)
        } else {
            Region::new(self.min - REGION_PAD, self.min + self.extent(spacing))
        }
    }
}

/// Computes the regions over which close levels are spread.
///
/// `levels` must be sorted ascending. The scan runs low to high, or high to
/// low when `reverse` is set; the start of the scan anchors each region. A
/// level joins the open cluster when it is closer than `spacing` to the level
/// before it, or closer than `cluster size × spacing` to the cluster's
/// anchored extreme. The first and last levels bound the sequence and never
/// join a cluster.
///
/// Non-positive or non-finite spacing yields no regions.
pub fn normalize_regions(levels: &[f32], spacing: f32, reverse: bool) -> Vec<Region> {
    if !(spacing.is_finite() && spacing > 0.0) || levels.len() < 4 {
        return Vec::new();
    }

    let interior = &levels[1..levels.len() - 1];
    let scan: Vec<f32> = if reverse {
        interior.iter().rev().copied().collect()
    } else {
        interior.to_vec()
    };

    let mut clusters = Vec::new();
    let mut open: Option<Cluster> = None;
    for pair in scan.windows(2) {
        let (previous, energy) = (pair[0], pair[1]);

        if (energy - previous).abs() < spacing {
            match open.as_mut() {
                Some(cluster) => cluster.push(energy),
                None => open = Some(Cluster::new(previous, energy)),
            }
        } else if let Some(cluster) = open.as_mut() {
            if cluster.accepts(energy, spacing, reverse) {
                cluster.push(energy);
            } else {
                clusters.extend(open.take());
            }
        }
    }
    clusters.extend(open);

    let regions: Vec<Region> = clusters
        .iter()
        .map(|cluster| cluster.region(spacing, reverse))
        .collect();
    trace!(regions:? = regions, spacing, reverse; "Normalized regions");
    regions
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_well_separated_levels_have_no_regions() {
        assert!(normalize_regions(&[0.0, 100.0, 200.0, 300.0, 400.0], 100.0, false).is_empty());
        assert!(normalize_regions(&[0.0, 100.0, 200.0, 300.0, 400.0], 100.0, true).is_empty());
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(normalize_regions(&[], 10.0, false).is_empty());
        assert!(normalize_regions(&[5.0], 10.0, false).is_empty());
        assert!(normalize_regions(&[0.0, 1.0, 2.0], 10.0, false).is_empty());
        assert!(normalize_regions(&[0.0, 1.0, 2.0, 3.0], 0.0, false).is_empty());
        assert!(normalize_regions(&[0.0, 1.0, 2.0, 3.0], -1.0, false).is_empty());
        assert!(normalize_regions(&[0.0, 1.0, 2.0, 3.0], f32::NAN, false).is_empty());
    }

    #[test]
    fn test_boundary_levels_are_excluded() {
        // 0 and 5 collide, but 0 is the first level
        assert!(normalize_regions(&[0.0, 5.0, 100.0, 200.0], 20.0, false).is_empty());
        // 195 and 200 collide, but 200 is the last level
        assert!(normalize_regions(&[0.0, 100.0, 195.0, 200.0], 20.0, true).is_empty());
    }

    #[test]
    fn test_forward_region_anchors_at_minimum() {
        let regions = normalize_regions(&[0.0, 100.0, 110.0, 115.0, 500.0], 20.0, false);

        assert_eq!(regions.len(), 1);
        assert_approx_eq!(f32, regions[0].lower(), 99.0);
        assert_approx_eq!(f32, regions[0].upper(), 160.0);
    }

    #[test]
    fn test_reverse_region_anchors_at_maximum() {
        let regions = normalize_regions(&[0.0, 100.0, 110.0, 115.0, 500.0], 20.0, true);

        assert_eq!(regions.len(), 1);
        assert_approx_eq!(f32, regions[0].lower(), 55.0);
        assert_approx_eq!(f32, regions[0].upper(), 116.0);
    }

    #[test]
    fn test_cluster_grows_through_extremum_tolerance() {
        // 100-110 opens a cluster; 135 is 25 from 110 but 35 < 2 * 20 from 100
        let regions = normalize_regions(&[0.0, 100.0, 110.0, 135.0, 900.0], 20.0, false);

        assert_eq!(regions.len(), 1);
        assert_approx_eq!(f32, regions[0].upper(), 160.0);
    }

    #[test]
    fn test_separate_clusters_give_separate_regions() {
        let regions =
            normalize_regions(&[0.0, 100.0, 105.0, 400.0, 404.0, 408.0, 1000.0], 10.0, false);

        assert_eq!(regions.len(), 2);
        assert_approx_eq!(f32, regions[0].lower(), 99.0);
        assert_approx_eq!(f32, regions[0].upper(), 120.0);
        assert_approx_eq!(f32, regions[1].lower(), 399.0);
        assert_approx_eq!(f32, regions[1].upper(), 430.0);
    }

    #[test]
    fn test_region_contains() {
        let region = Region::new(9.0, 50.0);
        assert!(region.contains(9.0));
        assert!(region.contains(50.0));
        assert!(!region.contains(50.5));
        assert_approx_eq!(f32, region.width(), 41.0);
    }

    proptest! {
        #[test]
        fn wide_gaps_never_form_regions(
            start in -1000.0f32..1000.0,
            gaps in prop::collection::vec(10.0f32..500.0, 0..12),
            reverse in any::<bool>(),
        ) {
            let mut levels = vec![start];
            for gap in gaps {
                let last = levels[levels.len() - 1];
                levels.push(last + gap);
            }

            prop_assert!(normalize_regions(&levels, 9.0, reverse).is_empty());
        }

        #[test]
        fn regions_cover_cluster_extent(
            base in 0.0f32..1000.0,
            offsets in prop::collection::vec(0.0f32..4.0, 2..6),
            reverse in any::<bool>(),
        ) {
            let mut levels = vec![base - 1000.0];
            let mut energy = base;
            for offset in &offsets {
                energy += offset + 0.5;
                levels.push(energy);
            }
            levels.push(energy + 1000.0);

            let regions = normalize_regions(&levels, 10.0, reverse);
            prop_assert_eq!(regions.len(), 1);
            let expected = offsets.len() as f32 * 10.0 + REGION_PAD;
            prop_assert!((regions[0].width() - expected).abs() < 1e-2);
        }
    }
}
