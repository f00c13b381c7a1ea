//! Label distance transform
//!
//! For every pixel, finds the closest pixel that carries a *different*
//! label, together with the closest pixel of a third label (the "second
//! nearest"). Distances are chamfer path lengths measured with
//! [`AXIAL_COST`](crate::sweep::AXIAL_COST) per axial step and
//! [`DIAGONAL_COST`](crate::sweep::DIAGONAL_COST) per diagonal step.
//!
//! Paths only travel through the pixel's own region: a neighbour's result
//! is reused only if it was computed inside the same region. Every cell
//! therefore stores, alongside each candidate, the region (guard) it was
//! measured from.
//!
//! The transform alternates forward and backward sweeps until a complete
//! pair of sweeps leaves every cell untouched.

use crate::error::RegionResult;
use crate::label::RegionLabels;
use crate::sweep::Sweep;
use deband_core::Field;

/// Distance of a label that was never reached
pub const UNREACHED: u32 = u32::MAX;

/// A label and its path distance from a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelDistance {
    /// Label of the region, 0 if none was found
    pub label: u32,
    /// Chamfer distance, [`UNREACHED`] if none was found
    pub distance: u32,
}

impl LabelDistance {
    /// No label found.
    pub const NONE: LabelDistance = LabelDistance {
        label: 0,
        distance: UNREACHED,
    };

    /// The label, if one was found.
    #[inline]
    pub fn label(&self) -> Option<u32> {
        (self.label != 0).then_some(self.label)
    }
}

impl Default for LabelDistance {
    fn default() -> Self {
        Self::NONE
    }
}

/// Nearest and second-nearest foreign labels of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NearestLabels {
    /// Closest label different from the pixel's own
    pub nearest: LabelDistance,
    /// Closest label different from both the pixel's own and `nearest`
    pub second: LabelDistance,
}

/// Per-pixel result of [`label_distance`]
pub type DistanceField = Field<NearestLabels>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reach {
    label: u32,
    distance: u32,
    guard: u32,
}

impl Reach {
    const EMPTY: Reach = Reach {
        label: 0,
        distance: UNREACHED,
        guard: 0,
    };

    #[inline]
    fn is_valid_for(&self, own: u32) -> bool {
        self.label != 0 && self.guard == own
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    first: Reach,
    second: Reach,
}

impl Cell {
    const EMPTY: Cell = Cell {
        first: Reach::EMPTY,
        second: Reach::EMPTY,
    };
}

/// Two incumbents plus, for each of four neighbours, the neighbour itself
/// and its two stored reaches.
const MAX_CANDIDATES: usize = 2 + 4 * 3;

struct Candidates {
    items: [Reach; MAX_CANDIDATES],
    len: usize,
}

impl Candidates {
    fn new() -> Self {
        Self {
            items: [Reach::EMPTY; MAX_CANDIDATES],
            len: 0,
        }
    }

    #[inline]
    fn push(&mut self, reach: Reach) {
        self.items[self.len] = reach;
        self.len += 1;
    }

    /// Smallest valid candidate whose label is not `exclude`. Earlier
    /// candidates win ties.
    fn best(&self, own: u32, exclude: u32) -> Reach {
        let mut best = Reach::EMPTY;
        for reach in &self.items[..self.len] {
            if reach.is_valid_for(own)
                && reach.label != exclude
                && (best.label == 0 || reach.distance < best.distance)
            {
                best = *reach;
            }
        }
        best
    }
}

/// Compute the nearest and second-nearest foreign label of every pixel.
///
/// A pixel whose region touches no other region (e.g. a uniform image)
/// gets [`LabelDistance::NONE`] for both entries.
///
/// # Examples
///
/// ```
/// use deband_core::{Rgb, RgbImage};
/// use deband_region::{label_distance, label_regions};
///
/// let image = RgbImage::from_fn(4, 1, |x, _| {
///     if x < 2 { Rgb::new(0, 0, 0) } else { Rgb::new(9, 9, 9) }
/// })
/// .unwrap();
/// let regions = label_regions(&image).unwrap();
/// let field = label_distance(&regions).unwrap();
/// let cell = field.get(0, 0).unwrap();
/// assert_eq!(cell.nearest.label(), Some(2));
/// assert_eq!(cell.nearest.distance, 10);
/// assert_eq!(cell.second.label(), None);
/// ```
pub fn label_distance(regions: &RegionLabels) -> RegionResult<DistanceField> {
    let labels = regions.labels();
    let (width, height) = labels.dimensions();
    let mut cells = Field::new(width, height, Cell::EMPTY)?;
    let mut iterations = 0u32;

    loop {
        iterations += 1;
        let forward = relax(labels, &mut cells, Sweep::Forward);
        let backward = relax(labels, &mut cells, Sweep::Backward);
        if !forward && !backward {
            break;
        }
    }

    tracing::debug!(width, height, iterations, "label distance converged");

    let field = cells.map(|cell| NearestLabels {
        nearest: to_label_distance(cell.first),
        second: to_label_distance(cell.second),
    })?;
    Ok(field)
}

fn to_label_distance(reach: Reach) -> LabelDistance {
    if reach.label == 0 {
        LabelDistance::NONE
    } else {
        LabelDistance {
            label: reach.label,
            distance: reach.distance,
        }
    }
}

/// One sweep. Returns true if any cell changed.
fn relax(labels: &Field<u32>, cells: &mut Field<Cell>, sweep: Sweep) -> bool {
    let (width, height) = labels.dimensions();
    let mut changed = false;

    sweep.visit(width, height, |x, y| {
        let i = labels.index(x, y);
        let own = labels.data()[i];
        let current = cells.data()[i];

        let mut candidates = Candidates::new();
        candidates.push(current.first);
        candidates.push(current.second);

        for step in sweep.steps() {
            let Some(n) = labels.offset_index(x, y, step.dx, step.dy) else {
                continue;
            };
            let neighbour = labels.data()[n];
            if neighbour != own {
                candidates.push(Reach {
                    label: neighbour,
                    distance: step.cost,
                    guard: own,
                });
            }
            let cell = cells.data()[n];
            for reach in [cell.first, cell.second] {
                if reach.label != 0 && reach.label != own {
                    candidates.push(Reach {
                        label: reach.label,
                        distance: reach.distance.saturating_add(step.cost),
                        guard: reach.guard,
                    });
                }
            }
        }

        let first = candidates.best(own, 0);
        let second = if first.label == 0 {
            Reach::EMPTY
        } else {
            candidates.best(own, first.label)
        };
        let updated = Cell { first, second };

        if updated != current {
            cells.data_mut()[i] = updated;
            changed = true;
        }
    });

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::label_regions;
    use deband_core::{Rgb, RgbImage};

    fn stripes(width: u32, height: u32, bounds: &[u32]) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| {
            let band = bounds.iter().filter(|&&b| x >= b).count() as u8;
            Rgb::new(band * 40, band * 40, band * 40)
        })
        .unwrap()
    }

    #[test]
    fn test_vertical_split() {
        let img = stripes(6, 4, &[3]);
        let regions = label_regions(&img).unwrap();
        let field = label_distance(&regions).unwrap();
        for y in 0..4 {
            for x in 0..6 {
                let cell = field.get(x, y).unwrap();
                let (other, steps) = if x < 3 { (2, 3 - x) } else { (1, x - 2) };
                assert_eq!(cell.nearest.label(), Some(other), "({x},{y})");
                assert_eq!(cell.nearest.distance, 5 * steps, "({x},{y})");
                assert_eq!(cell.second, LabelDistance::NONE);
            }
        }
    }

    #[test]
    fn test_three_stripes_second_nearest() {
        let img = stripes(6, 3, &[2, 4]);
        let regions = label_regions(&img).unwrap();
        assert_eq!(regions.max_label(), 3);
        let field = label_distance(&regions).unwrap();

        for y in 0..3 {
            let b_left = field.get(2, y).unwrap();
            assert_eq!(b_left.nearest, LabelDistance { label: 1, distance: 5 });
            assert_eq!(b_left.second, LabelDistance { label: 3, distance: 10 });

            let b_right = field.get(3, y).unwrap();
            assert_eq!(b_right.nearest, LabelDistance { label: 3, distance: 5 });
            assert_eq!(b_right.second, LabelDistance { label: 1, distance: 10 });

            for x in [0, 1, 4, 5] {
                let cell = field.get(x, y).unwrap();
                assert_eq!(cell.nearest.label(), Some(2));
                assert_eq!(cell.second.label(), None);
            }
        }
    }

    #[test]
    fn test_diagonal_cost() {
        // single foreign pixel in the corner of a 3x3 block
        let img = RgbImage::from_fn(3, 3, |x, y| {
            if x == 2 && y == 2 {
                Rgb::new(1, 2, 3)
            } else {
                Rgb::new(0, 0, 0)
            }
        })
        .unwrap();
        let regions = label_regions(&img).unwrap();
        let field = label_distance(&regions).unwrap();
        assert_eq!(field.get(1, 1).unwrap().nearest.distance, 7);
        assert_eq!(field.get(0, 0).unwrap().nearest.distance, 14);
        assert_eq!(field.get(0, 2).unwrap().nearest.distance, 10);
        assert_eq!(field.get(2, 2).unwrap().nearest.distance, 5);
    }

    #[test]
    fn test_uniform_image_has_no_neighbours() {
        let img = RgbImage::filled(5, 4, Rgb::new(7, 7, 7)).unwrap();
        let regions = label_regions(&img).unwrap();
        let field = label_distance(&regions).unwrap();
        assert!(
            field
                .data()
                .iter()
                .all(|c| *c == NearestLabels::default())
        );
    }
}
