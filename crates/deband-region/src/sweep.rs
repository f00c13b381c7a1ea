//! Raster sweep neighbourhoods
//!
//! Both the region labeler and the distance transform alternate a forward
//! raster sweep (top-left to bottom-right) with a backward one. Each sweep
//! only consults the four 8-neighbours that it has already visited, so the
//! union of the two sweeps covers the full 8-neighbourhood.

/// Cost of a step to an axis-adjacent neighbour.
pub const AXIAL_COST: u32 = 5;

/// Cost of a step to a diagonal neighbour.
pub const DIAGONAL_COST: u32 = 7;

/// One already-visited neighbour of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Column offset
    pub dx: i32,
    /// Row offset
    pub dy: i32,
    /// Path cost of moving across this step
    pub cost: u32,
}

impl Step {
    const fn axial(dx: i32, dy: i32) -> Self {
        Self {
            dx,
            dy,
            cost: AXIAL_COST,
        }
    }

    const fn diagonal(dx: i32, dy: i32) -> Self {
        Self {
            dx,
            dy,
            cost: DIAGONAL_COST,
        }
    }
}

/// Left, up, up-left, up-right.
const FORWARD_STEPS: [Step; 4] = [
    Step::axial(-1, 0),
    Step::axial(0, -1),
    Step::diagonal(-1, -1),
    Step::diagonal(1, -1),
];

/// Right, down, down-left, down-right.
const BACKWARD_STEPS: [Step; 4] = [
    Step::axial(1, 0),
    Step::axial(0, 1),
    Step::diagonal(-1, 1),
    Step::diagonal(1, 1),
];

/// Raster sweep order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Row-major from (0, 0)
    Forward,
    /// Reverse row-major from (width-1, height-1)
    Backward,
}

impl Sweep {
    /// The neighbours already visited when a pixel is reached, axial steps
    /// first.
    #[inline]
    pub fn steps(self) -> &'static [Step; 4] {
        match self {
            Sweep::Forward => &FORWARD_STEPS,
            Sweep::Backward => &BACKWARD_STEPS,
        }
    }

    /// Call `f(x, y)` for every pixel in sweep order.
    pub fn visit<F: FnMut(u32, u32)>(self, width: u32, height: u32, mut f: F) {
        match self {
            Sweep::Forward => {
                for y in 0..height {
                    for x in 0..width {
                        f(x, y);
                    }
                }
            }
            Sweep::Backward => {
                for y in (0..height).rev() {
                    for x in (0..width).rev() {
                        f(x, y);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_cover_neighbourhood() {
        let mut all: Vec<(i32, i32)> = Sweep::Forward
            .steps()
            .iter()
            .chain(Sweep::Backward.steps().iter())
            .map(|s| (s.dx, s.dy))
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 8);
        assert!(!all.contains(&(0, 0)));
    }

    #[test]
    fn test_step_costs() {
        for s in Sweep::Forward.steps().iter().chain(Sweep::Backward.steps()) {
            let expected = if s.dx != 0 && s.dy != 0 {
                DIAGONAL_COST
            } else {
                AXIAL_COST
            };
            assert_eq!(s.cost, expected);
        }
    }

    #[test]
    fn test_forward_steps_point_backwards_in_raster_order() {
        for s in Sweep::Forward.steps() {
            assert!(s.dy < 0 || (s.dy == 0 && s.dx < 0));
        }
        for s in Sweep::Backward.steps() {
            assert!(s.dy > 0 || (s.dy == 0 && s.dx > 0));
        }
    }

    #[test]
    fn test_visit_order() {
        let mut fwd = Vec::new();
        Sweep::Forward.visit(2, 2, |x, y| fwd.push((x, y)));
        assert_eq!(fwd, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);

        let mut bwd = Vec::new();
        Sweep::Backward.visit(2, 2, |x, y| bwd.push((x, y)));
        assert_eq!(bwd, vec![(1, 1), (0, 1), (1, 0), (0, 0)]);
    }
}
