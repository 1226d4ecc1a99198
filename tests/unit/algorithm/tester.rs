//! Tests for structural rule evaluation

#[cfg(test)]
mod tests {
    use circuit_trainer::algorithm::tester::{
        CircuitTester, RuleViolation, TestPolicy, component_of,
    };
    use circuit_trainer::spatial::{Catalog, GridStore};

    fn layout(rows: &[&str]) -> GridStore {
        let catalog = Catalog::new();
        let mut grid = GridStore::new(rows.len()).expect("valid size");
        for (row, line) in rows.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                let kind = catalog.resolve(&symbol.to_string()).expect("known symbol");
                grid.place(row, col, kind).expect("in range");
            }
        }
        grid
    }

    #[test]
    fn test_blank_grid_lacks_both_terminals() {
        let grid = GridStore::new(4).expect("valid size");
        let report = CircuitTester::default().evaluate(&grid);

        assert_eq!(
            report.violations,
            vec![RuleViolation::MissingSource, RuleViolation::MissingGround]
        );
        assert!(!CircuitTester::default().test_circuit(&grid));
    }

    // Battery, wire, load, ground in a row is the smallest passing circuit
    #[test]
    fn test_loaded_series_circuit_passes() {
        let grid = layout(&["B-RG", "....", "....", "...."]);
        let report = CircuitTester::default().evaluate(&grid);

        assert!(report.passed(), "unexpected violations: {:?}", report.violations);
    }

    #[test]
    fn test_wire_touching_ground_is_a_short() {
        let grid = layout(&["B-G.", "....", "....", "...."]);
        let report = CircuitTester::default().evaluate(&grid);

        assert_eq!(
            report.violations,
            vec![RuleViolation::ShortCircuit { at: [0, 1] }]
        );
    }

    #[test]
    fn test_battery_touching_ground_reports_the_ground() {
        let grid = layout(&["BG..", "....", "....", "...."]);
        let report = CircuitTester::default().evaluate(&grid);

        assert_eq!(
            report.violations,
            vec![RuleViolation::ShortCircuit { at: [0, 1] }]
        );
    }

    // A short reached through several wires is reported once per closing cell
    #[test]
    fn test_short_through_long_wire_is_reported_once() {
        let grid = layout(&["B---", "...-", "...-", "..G-"]);
        let report = CircuitTester::default().evaluate(&grid);

        assert_eq!(
            report.violations,
            vec![RuleViolation::ShortCircuit { at: [3, 3] }]
        );
    }

    #[test]
    fn test_isolated_battery_is_disconnected() {
        let grid = layout(&["B-..", "....", "....", "...G"]);
        let report = CircuitTester::default().evaluate(&grid);

        assert_eq!(
            report.violations,
            vec![RuleViolation::Disconnected { battery: [0, 0] }]
        );
    }

    // Two batteries in one component count as a single disconnection
    #[test]
    fn test_shared_component_reported_once() {
        let grid = layout(&["B-B.", "....", "....", "...G"]);
        let report = CircuitTester::default().evaluate(&grid);

        assert_eq!(
            report.violations,
            vec![RuleViolation::Disconnected { battery: [0, 0] }]
        );
    }

    #[test]
    fn test_led_needs_adjacent_resistor() {
        let unprotected = layout(&["B-RG", "....", "..*.", "...."]);
        let protected = layout(&["B-RG", "..*.", "....", "...."]);
        let tester = CircuitTester::default();

        assert_eq!(
            tester.evaluate(&unprotected).violations,
            vec![RuleViolation::UnprotectedLed { at: [2, 2] }]
        );
        assert!(tester.test_circuit(&protected));
    }

    #[test]
    fn test_permissive_policy_accepts_anything() {
        let tester = CircuitTester::new(TestPolicy::permissive());

        assert!(tester.test_circuit(&GridStore::new(3).expect("valid size")));
        assert!(tester.test_circuit(&layout(&["BG.", "*..", "..."])));
    }

    #[test]
    fn test_single_rule_can_be_disabled() {
        let policy = TestPolicy {
            led_requires_resistor: false,
            ..TestPolicy::default()
        };
        let grid = layout(&["B-RG", "....", "..*.", "...."]);

        assert!(CircuitTester::new(policy).test_circuit(&grid));
        assert!(!CircuitTester::default().test_circuit(&grid));
    }

    // Same grid in, same verdict out
    #[test]
    fn test_evaluation_is_deterministic() {
        let grid = layout(&["B-G.", "C*..", ".BL.", "S..D"]);
        let tester = CircuitTester::default();

        let first = tester.evaluate(&grid);
        for _ in 0..5 {
            assert_eq!(tester.evaluate(&grid), first);
        }
    }

    #[test]
    fn test_component_of_follows_occupied_cells() {
        let grid = layout(&["B-..", "..R.", "..RG", "...."]);

        let mut component = component_of(&grid, [0, 0]);
        component.sort_unstable();
        assert_eq!(component, vec![[0, 0], [0, 1]]);

        assert_eq!(component_of(&grid, [2, 3]).len(), 3);
        assert!(component_of(&grid, [3, 3]).is_empty());
    }

    #[test]
    fn test_violation_messages_and_positions() {
        assert_eq!(RuleViolation::MissingSource.to_string(), "no battery placed");
        assert_eq!(
            RuleViolation::ShortCircuit { at: [1, 2] }.to_string(),
            "short circuit through (1, 2)"
        );
        assert_eq!(
            RuleViolation::UnprotectedLed { at: [3, 0] }.position(),
            Some([3, 0])
        );
        assert_eq!(RuleViolation::MissingGround.position(), None);
    }
}
