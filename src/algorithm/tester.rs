//! Structural validity check for a grid layout
//!
//! The tester is a pure function of grid contents. Each rule runs at most
//! one flood fill over the grid, marking cells in a shared bitset so every
//! cell is expanded once per rule, keeping the whole check at O(size²).

use std::collections::VecDeque;
use std::fmt;

use bitvec::prelude::*;

use crate::spatial::validator::{Position, neighbours};
use crate::spatial::{ComponentType, GridStore};

/// Which structural rules a diagram must satisfy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
// Each flag toggles one independent rule
#[allow(clippy::struct_excessive_bools)]
pub struct TestPolicy {
    /// At least one battery must be placed
    pub require_source: bool,
    /// At least one ground must be placed
    pub require_ground: bool,
    /// No battery may reach a ground through wires alone
    pub forbid_short_circuit: bool,
    /// Every battery must share a connected component with a ground
    pub require_connectivity: bool,
    /// Every LED needs an adjacent resistor
    pub led_requires_resistor: bool,
}

impl Default for TestPolicy {
    fn default() -> Self {
        Self {
            require_source: true,
            require_ground: true,
            forbid_short_circuit: true,
            require_connectivity: true,
            led_requires_resistor: true,
        }
    }
}

impl TestPolicy {
    /// Policy with every rule disabled, so any layout passes
    pub const fn permissive() -> Self {
        Self {
            require_source: false,
            require_ground: false,
            forbid_short_circuit: false,
            require_connectivity: false,
            led_requires_resistor: false,
        }
    }
}

/// A single failed rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleViolation {
    /// No battery anywhere on the grid
    MissingSource,
    /// No ground anywhere on the grid
    MissingGround,
    /// A battery reaches a ground through wires only
    ShortCircuit {
        /// Cell adjacent to the ground that closes the short (the ground
        /// itself when a battery touches it directly)
        at: Position,
    },
    /// A battery's component contains no ground
    Disconnected {
        /// First battery of the isolated component in row-major order
        battery: Position,
    },
    /// An LED without a neighbouring resistor
    UnprotectedLed {
        /// Position of the LED
        at: Position,
    },
}

impl RuleViolation {
    /// Grid position the violation points at, if any
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::MissingSource | Self::MissingGround => None,
            Self::ShortCircuit { at } | Self::UnprotectedLed { at } => Some(*at),
            Self::Disconnected { battery } => Some(*battery),
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource => f.write_str("no battery placed"),
            Self::MissingGround => f.write_str("no ground placed"),
            Self::ShortCircuit { at: [row, col] } => {
                write!(f, "short circuit through ({row}, {col})")
            }
            Self::Disconnected {
                battery: [row, col],
            } => {
                write!(f, "battery at ({row}, {col}) has no path to ground")
            }
            Self::UnprotectedLed { at: [row, col] } => {
                write!(f, "LED at ({row}, {col}) has no adjacent resistor")
            }
        }
    }
}

/// Outcome of evaluating a layout
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestReport {
    /// Violations in rule order, each rule reporting in row-major order
    pub violations: Vec<RuleViolation>,
}

impl TestReport {
    /// Whether no rule failed
    pub const fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Evaluates grids against a fixed policy
#[derive(Clone, Debug, Default)]
pub struct CircuitTester {
    policy: TestPolicy,
}

impl CircuitTester {
    /// Create a tester for the given rules
    pub const fn new(policy: TestPolicy) -> Self {
        Self { policy }
    }

    /// Active rule set
    pub const fn policy(&self) -> &TestPolicy {
        &self.policy
    }

    /// Whether the layout satisfies every active rule
    pub fn test_circuit(&self, grid: &GridStore) -> bool {
        self.evaluate(grid).passed()
    }

    /// List every violated rule
    pub fn evaluate(&self, grid: &GridStore) -> TestReport {
        let mut violations = Vec::new();

        let batteries = grid.positions_of(ComponentType::Battery);
        let has_ground = grid.count(ComponentType::Ground) > 0;

        if self.policy.require_source && batteries.is_empty() {
            violations.push(RuleViolation::MissingSource);
        }
        if self.policy.require_ground && !has_ground {
            violations.push(RuleViolation::MissingGround);
        }
        if self.policy.forbid_short_circuit {
            violations.extend(find_short_circuits(grid, &batteries));
        }
        if self.policy.require_connectivity && has_ground {
            violations.extend(find_disconnected(grid, &batteries));
        }
        if self.policy.led_requires_resistor {
            violations.extend(find_unprotected_leds(grid));
        }

        TestReport { violations }
    }
}

/// Every cell 4-connected to `start` through non-empty cells
///
/// Returns an empty list when `start` itself is empty.
pub fn component_of(grid: &GridStore, start: Position) -> Vec<Position> {
    let size = grid.size();
    let mut visited = bitvec![0; size * size];
    flood(grid, &[start], &mut visited, ComponentType::is_component)
}

fn flood(
    grid: &GridStore,
    seeds: &[Position],
    visited: &mut BitVec,
    passable: impl Fn(ComponentType) -> bool,
) -> Vec<Position> {
    let size = grid.size();
    let mut queue = VecDeque::new();
    let mut reached = Vec::new();

    for &seed in seeds {
        if passable(grid.at(seed)) && mark(visited, seed, size) {
            queue.push_back(seed);
        }
    }

    while let Some(position) = queue.pop_front() {
        reached.push(position);
        for next in neighbours(position, size) {
            if passable(grid.at(next)) && mark(visited, next, size) {
                queue.push_back(next);
            }
        }
    }

    reached
}

/// Set the visited bit for `position`, returning whether it was unset
fn mark(visited: &mut BitVec, position: Position, size: usize) -> bool {
    let index = position[0] * size + position[1];
    index < visited.len() && !visited.replace(index, true)
}

fn find_short_circuits(grid: &GridStore, batteries: &[Position]) -> Vec<RuleViolation> {
    let size = grid.size();
    let mut visited = bitvec![0; size * size];
    let mut reported = bitvec![0; size * size];
    let mut violations = Vec::new();

    // Batteries conduct like wire here: chaining sources adds no load
    let wired = flood(grid, batteries, &mut visited, |kind| {
        matches!(kind, ComponentType::Wire | ComponentType::Battery)
    });

    for position in wired {
        let kind = grid.at(position);
        for next in neighbours(position, size) {
            if grid.at(next) != ComponentType::Ground {
                continue;
            }
            let at = if kind == ComponentType::Wire {
                position
            } else {
                next
            };
            if mark(&mut reported, at, size) {
                violations.push(RuleViolation::ShortCircuit { at });
            }
        }
    }

    violations
}

fn find_disconnected(grid: &GridStore, batteries: &[Position]) -> Vec<RuleViolation> {
    let size = grid.size();
    let mut visited = bitvec![0; size * size];
    let mut violations = Vec::new();

    for &battery in batteries {
        let component = flood(grid, &[battery], &mut visited, ComponentType::is_component);
        // Empty when an earlier battery already covered this component
        if component.is_empty() {
            continue;
        }
        let grounded = component
            .iter()
            .any(|&position| grid.at(position) == ComponentType::Ground);
        if !grounded {
            violations.push(RuleViolation::Disconnected { battery });
        }
    }

    violations
}

fn find_unprotected_leds(grid: &GridStore) -> Vec<RuleViolation> {
    let size = grid.size();
    grid.positions_of(ComponentType::Led)
        .into_iter()
        .filter(|&at| {
            !neighbours(at, size).any(|next| grid.at(next) == ComponentType::Resistor)
        })
        .map(|at| RuleViolation::UnprotectedLed { at })
        .collect()
}
