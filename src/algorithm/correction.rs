use std::fmt;

use tracing::{debug, info};

use crate::{
    algorithm::{
        generator::{RandomSelector, RejectedLayout},
        tester::{CircuitTester, RuleViolation, component_of},
    },
    io::configuration::{BASE_CORRECTION_RADIUS, MAX_CORRECTION_RADIUS},
    spatial::{
        ComponentType, GridStore,
        validator::{Position, neighbours, region_spans},
    },
};

/// One cell changed by a correction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellEdit {
    /// Grid position of the change
    pub position: Position,
    /// Kind before the change
    pub from: ComponentType,
    /// Kind after the change
    pub to: ComponentType,
}

impl fmt::Display for CellEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [row, col] = self.position;
        write!(f, "({row}, {col}): {} -> {}", self.from, self.to)
    }
}

/// Summary of cells changed by a correction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorrectionResult {
    /// Every cell that changed, in the order the changes were applied
    pub edits: Vec<CellEdit>,
    /// Violations a repair was applied for
    pub addressed: Vec<RuleViolation>,
    /// Perturbation radius, when the layout already passed and was reshaped
    pub radius: Option<usize>,
}

impl CorrectionResult {
    /// Number of cells the correction changed
    pub const fn cells_changed(&self) -> usize {
        self.edits.len()
    }
}

/// Moves a rejected or failing layout toward one that passes
///
/// Corrections are local: a single call changes at most `max_edits` cells.
/// Repeated corrections without an accepted verdict in between widen the
/// perturbation radius so a stubborn layout is reshaped over a growing area.
#[derive(Debug)]
pub struct CorrectionEngine {
    selector: RandomSelector,
    max_edits: usize,
    consecutive_corrections: usize,
    rejected: Option<RejectedLayout>,
}

impl CorrectionEngine {
    /// Create an engine changing at most `max_edits` cells per call
    pub fn new(seed: u64, max_edits: usize) -> Self {
        Self {
            selector: RandomSelector::new(seed),
            max_edits: max_edits.max(1),
            consecutive_corrections: 0,
            rejected: None,
        }
    }

    /// Record the layout the operator just rejected
    pub fn remember_rejection(&mut self, grid: &GridStore) {
        self.rejected = Some(RejectedLayout::capture(grid));
    }

    /// Layout of the last rejection, until an acceptance clears it
    pub const fn rejected_layout(&self) -> Option<&RejectedLayout> {
        self.rejected.as_ref()
    }

    /// Forget the rejected layout and reset the adaptive radius
    pub fn accept(&mut self) {
        self.rejected = None;
        self.consecutive_corrections = 0;
    }

    /// Corrections applied since the last acceptance
    pub const fn consecutive_corrections(&self) -> usize {
        self.consecutive_corrections
    }

    /// Maximum cells a single correction changes
    pub const fn max_edits(&self) -> usize {
        self.max_edits
    }

    /// Radius the next perturbation will use
    pub fn current_radius(&self) -> usize {
        (BASE_CORRECTION_RADIUS + self.consecutive_corrections).min(MAX_CORRECTION_RADIUS)
    }

    /// Mutate the grid toward a layout that passes the tester
    ///
    /// Repairs reported violations first. A layout with no violations is
    /// perturbed around a random load instead. The grid always ends up
    /// different from how it started.
    pub fn generate_correction(
        &mut self,
        grid: &mut GridStore,
        tester: &CircuitTester,
    ) -> CorrectionResult {
        let report = tester.evaluate(grid);
        let mut result = CorrectionResult::default();

        for violation in &report.violations {
            if result.edits.len() >= self.max_edits {
                break;
            }
            if let Some(edit) = self.repair(grid, violation) {
                result.edits.push(edit);
                result.addressed.push(*violation);
            }
        }

        if result.edits.is_empty() {
            let radius = self.current_radius();
            result.radius = Some(radius);
            result.edits = self.perturb(grid, radius);
        }

        if result.edits.is_empty() {
            result.edits.extend(self.force_change(grid));
        }

        self.consecutive_corrections += 1;

        info!(
            cells_changed = result.cells_changed(),
            violations = report.violations.len(),
            addressed = result.addressed.len(),
            "correction applied"
        );

        result
    }

    fn repair(&mut self, grid: &mut GridStore, violation: &RuleViolation) -> Option<CellEdit> {
        match *violation {
            RuleViolation::MissingSource => {
                let target = self.pick_terminal_site(grid, ComponentType::Ground)?;
                apply(grid, target, ComponentType::Battery)
            }
            RuleViolation::MissingGround => {
                let target = self.pick_terminal_site(grid, ComponentType::Battery)?;
                apply(grid, target, ComponentType::Ground)
            }
            RuleViolation::ShortCircuit { at } => apply(grid, at, ComponentType::Resistor),
            RuleViolation::Disconnected { battery } => extend_toward_ground(grid, battery),
            RuleViolation::UnprotectedLed { at } => protect_led(grid, at),
        }
    }

    /// Choose a cell for a new terminal, avoiding the opposite terminal
    ///
    /// Empty cells not touching `opposite` are preferred so the new
    /// terminal does not create a direct short.
    fn pick_terminal_site(&mut self, grid: &GridStore, opposite: ComponentType) -> Option<Position> {
        let size = grid.size();
        let mut preferred = Vec::new();
        let mut fallback = Vec::new();

        for (index, &kind) in grid.cells().indexed_iter() {
            let position = Position::from(index);
            if kind.is_terminal() {
                continue;
            }
            let touches_opposite = neighbours(position, size).any(|next| grid.at(next) == opposite);
            if kind == ComponentType::Empty && !touches_opposite {
                preferred.push(position);
            } else {
                fallback.push(position);
            }
        }

        if preferred.is_empty() {
            self.selector.choose(&fallback)
        } else {
            self.selector.choose(&preferred)
        }
    }

    /// Swap loads for other loads in a square region around a random load
    fn perturb(&mut self, grid: &mut GridStore, radius: usize) -> Vec<CellEdit> {
        let size = grid.size();
        let loads: Vec<Position> = grid
            .cells()
            .indexed_iter()
            .filter(|&(_, kind)| kind.is_load())
            .map(|(index, _)| Position::from(index))
            .collect();

        let Some(center) = self.selector.choose(&loads) else {
            return Vec::new();
        };

        let (row_span, col_span) = region_spans(center, radius, size);
        let mut candidates = Vec::new();
        for row in row_span {
            for col in col_span.clone() {
                if grid.at([row, col]).is_load() {
                    candidates.push([row, col]);
                }
            }
        }

        let mut edits = Vec::new();
        while edits.len() < self.max_edits && !candidates.is_empty() {
            let position = candidates.swap_remove(self.selector.index(candidates.len()));
            let current = grid.at(position);
            let avoided = self
                .rejected
                .as_ref()
                .and_then(|layout| layout.kind_at(position));

            let mut options: Vec<ComponentType> = ComponentType::LOADS
                .iter()
                .copied()
                .filter(|&kind| kind != current && Some(kind) != avoided)
                .collect();
            if options.is_empty() {
                options = ComponentType::LOADS
                    .iter()
                    .copied()
                    .filter(|&kind| kind != current)
                    .collect();
            }

            if let Some(replacement) = self.selector.choose(&options) {
                edits.extend(apply(grid, position, replacement));
            }
        }

        debug!(?center, radius, cells_changed = edits.len(), "layout perturbed");
        edits
    }

    /// Change one random cell to a different non-empty kind
    fn force_change(&mut self, grid: &mut GridStore) -> Option<CellEdit> {
        let size = grid.size();
        let position = [self.selector.index(size), self.selector.index(size)];
        let current = grid.at(position);
        let options: Vec<ComponentType> = ComponentType::PLACEABLE
            .iter()
            .copied()
            .filter(|&kind| kind != current)
            .collect();
        let replacement = self.selector.choose(&options)?;
        apply(grid, position, replacement)
    }
}

/// Write `kind` at `position`, reporting the edit if the cell changed
fn apply(grid: &mut GridStore, position: Position, kind: ComponentType) -> Option<CellEdit> {
    let from = grid.set(position, kind);
    (from != kind).then_some(CellEdit {
        position,
        from,
        to: kind,
    })
}

/// Grow a battery's component one cell toward the nearest ground
///
/// A cell that would touch a ground gets a resistor instead of a wire so the
/// new path carries a load. With no empty border the far end of the
/// component becomes a ground.
fn extend_toward_ground(grid: &mut GridStore, battery: Position) -> Option<CellEdit> {
    let size = grid.size();
    let component = component_of(grid, battery);
    let target = grid
        .positions_of(ComponentType::Ground)
        .into_iter()
        .min_by_key(|&ground| manhattan(ground, battery));

    let mut border = component
        .iter()
        .flat_map(|&cell| neighbours(cell, size))
        .filter(|&next| grid.at(next) == ComponentType::Empty);

    let next = match target {
        Some(ground) => border.min_by_key(|&cell| manhattan(cell, ground)),
        None => border.next(),
    };

    if let Some(cell) = next {
        let touches_ground =
            neighbours(cell, size).any(|near| grid.at(near) == ComponentType::Ground);
        let kind = if touches_ground {
            ComponentType::Resistor
        } else {
            ComponentType::Wire
        };
        apply(grid, cell, kind)
    } else {
        let far_end = component.iter().rev().find(|&&cell| cell != battery)?;
        apply(grid, *far_end, ComponentType::Ground)
    }
}

/// Put a resistor next to an LED, preferring empty cells and then wires
fn protect_led(grid: &mut GridStore, led: Position) -> Option<CellEdit> {
    let size = grid.size();
    let rank = |kind: ComponentType| match kind {
        ComponentType::Empty => Some(0),
        ComponentType::Wire => Some(1),
        ComponentType::Capacitor
        | ComponentType::Inductor
        | ComponentType::Diode
        | ComponentType::Switch => Some(2),
        _ => None,
    };

    let resistor_at = neighbours(led, size)
        .filter_map(|next| rank(grid.at(next)).map(|score| (score, next)))
        .min_by_key(|&(score, _)| score)
        .map_or(led, |(_, next)| next);

    apply(grid, resistor_at, ComponentType::Resistor)
}

const fn manhattan(a: Position, b: Position) -> usize {
    a[0].abs_diff(b[0]) + a[1].abs_diff(b[1])
}
