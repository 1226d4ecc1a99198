//! Tests for seeded random generation and rejection bias

#[cfg(test)]
mod tests {
    use circuit_trainer::algorithm::generator::{DiagramGenerator, RandomSelector, RejectedLayout};
    use circuit_trainer::spatial::{ComponentType, GridStore};

    #[test]
    fn test_generation_fills_every_cell() {
        let mut grid = GridStore::default();
        DiagramGenerator::new(42).generate_random_diagram(&mut grid, None);

        assert_eq!(grid.count(ComponentType::Empty), 0);
    }

    #[test]
    fn test_same_seed_same_diagram() {
        let mut first = GridStore::new(16).expect("valid size");
        let mut second = GridStore::new(16).expect("valid size");

        DiagramGenerator::new(7).generate_random_diagram(&mut first, None);
        DiagramGenerator::new(7).generate_random_diagram(&mut second, None);
        assert_eq!(first, second);

        let mut third = GridStore::new(16).expect("valid size");
        DiagramGenerator::new(8).generate_random_diagram(&mut third, None);
        assert_ne!(first, third);
    }

    // Every placeable kind shows up on a full-size grid
    #[test]
    fn test_unbiased_generation_uses_every_kind() {
        let mut grid = GridStore::default();
        DiagramGenerator::new(3).generate_random_diagram(&mut grid, None);

        for kind in ComponentType::PLACEABLE {
            assert!(grid.count(kind) > 0, "{kind} never generated");
        }
    }

    #[test]
    fn test_zero_weight_excludes_rejected_kind() {
        let mut rejected = GridStore::new(12).expect("valid size");
        for row in 0..12_usize {
            for col in 0..12 {
                rejected.place(row, col, ComponentType::Wire).expect("in range");
            }
        }
        let layout = RejectedLayout::capture(&rejected);

        let mut grid = GridStore::new(12).expect("valid size");
        DiagramGenerator::with_rejected_weight(5, 0.0)
            .generate_random_diagram(&mut grid, Some(&layout));

        assert_eq!(grid.count(ComponentType::Wire), 0);
        assert_eq!(grid.count(ComponentType::Empty), 0);
    }

    // Default bias makes the rejected kind much rarer than uniform
    #[test]
    fn test_default_bias_discourages_rejected_kind() {
        let mut rejected = GridStore::default();
        let size = rejected.size();
        for row in 0..size {
            for col in 0..size {
                rejected.place(row, col, ComponentType::Wire).expect("in range");
            }
        }
        let layout = RejectedLayout::capture(&rejected);

        let mut grid = GridStore::default();
        DiagramGenerator::new(11).generate_random_diagram(&mut grid, Some(&layout));

        let uniform_share = size * size / ComponentType::PLACEABLE.len();
        assert!(grid.count(ComponentType::Wire) < uniform_share / 2);
        assert!(!layout.matches(&grid));
    }

    #[test]
    fn test_rejected_layout_lookup() {
        let mut grid = GridStore::new(3).expect("valid size");
        grid.place(1, 1, ComponentType::Led).expect("in range");
        let layout = RejectedLayout::capture(&grid);

        assert_eq!(layout.kind_at([1, 1]), Some(ComponentType::Led));
        assert_eq!(layout.kind_at([0, 0]), Some(ComponentType::Empty));
        assert_eq!(layout.kind_at([3, 0]), None);
        assert!(layout.matches(&grid));
        assert_eq!(layout.cells().dim(), (3, 3));
    }

    #[test]
    fn test_weighted_choice_edge_cases() {
        let mut selector = RandomSelector::new(1);

        assert_eq!(selector.weighted_choice(&[]), 0);
        assert_eq!(selector.weighted_choice(&[0.0, 0.0]), 0);
        for _ in 0..50 {
            assert_eq!(selector.weighted_choice(&[0.0, 0.0, 2.5]), 2);
        }
    }

    #[test]
    fn test_uniform_helpers() {
        let mut selector = RandomSelector::new(2);

        assert_eq!(selector.index(0), 0);
        assert_eq!(selector.choose::<u8>(&[]), None);
        for _ in 0..50 {
            assert!(selector.index(4) < 4);
            assert_eq!(selector.choose(&[9_u8]), Some(9));
        }
    }
}
