//! Random diagram generation with rejection bias

use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::io::configuration::REJECTED_KIND_WEIGHT;
use crate::spatial::{ComponentType, GridStore};

/// Layout the operator rejected, kept to steer later generations away from it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedLayout {
    cells: Array2<ComponentType>,
}

impl RejectedLayout {
    /// Capture the current grid contents
    pub fn capture(grid: &GridStore) -> Self {
        Self {
            cells: grid.snapshot(),
        }
    }

    /// Kind the rejected layout held at a position
    pub fn kind_at(&self, position: [usize; 2]) -> Option<ComponentType> {
        self.cells.get(position).copied()
    }

    /// Borrow the captured cells
    pub const fn cells(&self) -> &Array2<ComponentType> {
        &self.cells
    }

    /// Whether the grid is identical to the rejected layout
    pub fn matches(&self, grid: &GridStore) -> bool {
        *grid.cells() == self.cells
    }
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generic weighted random selection
    ///
    /// Returns index into weights array using cumulative distribution.
    /// Entries with zero weight are never chosen unless every weight is zero.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        let mut last_positive = 0;
        for (i, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            last_positive = i;
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        last_positive
    }

    /// Uniform index in `0..len`, or 0 for an empty range
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.rng.random_range(0..len)
        }
    }

    /// Uniform element of a slice
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        let index = self.index(items.len());
        items.get(index).copied()
    }
}

/// Fills grids with random components
#[derive(Debug)]
pub struct DiagramGenerator {
    selector: RandomSelector,
    rejected_weight: f64,
}

impl DiagramGenerator {
    /// Create a generator with the default rejection weight
    pub fn new(seed: u64) -> Self {
        Self::with_rejected_weight(seed, REJECTED_KIND_WEIGHT)
    }

    /// Create a generator with a custom weight for previously rejected kinds
    ///
    /// The weight is clamped to `[0, 1]`; 1 disables the bias.
    pub fn with_rejected_weight(seed: u64, rejected_weight: f64) -> Self {
        Self {
            selector: RandomSelector::new(seed),
            rejected_weight: rejected_weight.clamp(0.0, 1.0),
        }
    }

    /// Fill every cell with a non-empty component
    ///
    /// Without a bias every placeable kind is equally likely. With a
    /// rejected layout, the kind that layout held at each cell is
    /// down-weighted so the rejected pattern is unlikely to recur.
    pub fn generate_random_diagram(&mut self, grid: &mut GridStore, bias: Option<&RejectedLayout>) {
        let size = grid.size();
        let mut weights = [1.0; ComponentType::PLACEABLE.len()];

        for row in 0..size {
            for col in 0..size {
                let position = [row, col];
                let kind = match bias.and_then(|layout| layout.kind_at(position)) {
                    Some(rejected) => {
                        for (weight, &candidate) in weights.iter_mut().zip(&ComponentType::PLACEABLE) {
                            *weight = if candidate == rejected {
                                self.rejected_weight
                            } else {
                                1.0
                            };
                        }
                        let index = self.selector.weighted_choice(&weights);
                        ComponentType::PLACEABLE.get(index).copied()
                    }
                    None => self.selector.choose(&ComponentType::PLACEABLE),
                };
                grid.set(position, kind.unwrap_or(ComponentType::Wire));
            }
        }

        debug!(size, biased = bias.is_some(), "random diagram generated");
    }
}
