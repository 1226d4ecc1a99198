//! Tests for coordinate validation and neighbourhood helpers

#[cfg(test)]
mod tests {
    use circuit_trainer::CircuitError;
    use circuit_trainer::io::configuration::GRID_SIZE;
    use circuit_trainer::spatial::validator::{
        checked_position, is_valid_coordinate, is_within, neighbours, region_spans,
    };

    #[test]
    fn test_default_grid_bounds() {
        let last = GRID_SIZE as i64 - 1;

        assert!(is_valid_coordinate(0_i64, 0));
        assert!(is_valid_coordinate(last, last));
        assert!(!is_valid_coordinate(GRID_SIZE as i64, 0));
        assert!(!is_valid_coordinate(0, GRID_SIZE as i64));
        assert!(!is_valid_coordinate(-1_i64, 0));
        assert!(!is_valid_coordinate(0_i64, -1));
    }

    #[test]
    fn test_within_custom_size() {
        assert!(is_within(3_u8, 3, 4));
        assert!(!is_within(4_u8, 0, 4));
        assert!(!is_within(0_i32, 0, 0));
        assert!(!is_within(i64::MIN, 0, 4));
    }

    #[test]
    fn test_checked_position_reports_offending_coordinate() {
        assert_eq!(checked_position(2_i64, 1, 5).ok(), Some([2, 1]));

        match checked_position(7_i64, -3, 5) {
            Err(CircuitError::CoordinateOutOfRange { row, col, size }) => {
                assert_eq!(row, 7);
                assert_eq!(col, -3);
                assert_eq!(size, 5);
            }
            other => unreachable!("Expected CoordinateOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_neighbours_clip_at_edges() {
        let corner: Vec<_> = neighbours([0, 0], 4).collect();
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&[1, 0]));
        assert!(corner.contains(&[0, 1]));

        assert_eq!(neighbours([1, 1], 4).count(), 4);
        assert_eq!(neighbours([3, 3], 4).count(), 2);
        assert_eq!(neighbours([0, 0], 1).count(), 0);
    }

    #[test]
    fn test_region_spans_are_clamped() {
        let (rows, cols) = region_spans([0, 5], 2, 6);
        assert_eq!(rows, 0..3);
        assert_eq!(cols, 3..6);

        let (rows, cols) = region_spans([3, 3], 0, 6);
        assert_eq!(rows, 3..4);
        assert_eq!(cols, 3..4);
    }
}
