//! Tests for error messages and classification

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;

    use circuit_trainer::CircuitError;
    use circuit_trainer::io::error::{WithPath, invalid_argument, invalid_parameter};

    #[test]
    fn test_messages_name_the_offending_input() {
        let out_of_range = CircuitError::CoordinateOutOfRange {
            row: 32,
            col: -1,
            size: 32,
        };
        assert_eq!(
            out_of_range.to_string(),
            "Coordinate (32, -1) is out of range (grid is 32x32)"
        );

        let store = CircuitError::StoreAccess {
            address: 1023,
            length: 2,
            capacity: 1024,
        };
        assert_eq!(
            store.to_string(),
            "Store access of 2 byte(s) at address 1023 exceeds capacity 1024"
        );

        assert_eq!(
            invalid_parameter("grid_size", &0, &"must be positive").to_string(),
            "Invalid parameter 'grid_size' = '0': must be positive"
        );
        assert_eq!(
            invalid_argument("add", "row", &"'x'").to_string(),
            "Invalid row for 'add': 'x'"
        );
    }

    // Input errors can be fixed by retyping; environment errors cannot
    #[test]
    fn test_input_error_classification() {
        assert!(
            CircuitError::UnknownComponent {
                name: "x".to_string()
            }
            .is_input_error()
        );
        assert!(
            CircuitError::MissingArgument {
                command: "add",
                argument: "row"
            }
            .is_input_error()
        );
        assert!(
            !CircuitError::StoreAccess {
                address: 0,
                length: 1,
                capacity: 0
            }
            .is_input_error()
        );
    }

    #[test]
    fn test_file_system_error_keeps_source() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk gone"));

        let error = result
            .with_path("store.eeprom", "write")
            .expect_err("error should propagate");

        assert!(error.source().is_some());
        assert!(!error.is_input_error());
        assert!(error.to_string().contains("write on 'store.eeprom'"));
        match error {
            CircuitError::FileSystem { path, .. } => {
                assert_eq!(path, PathBuf::from("store.eeprom"));
            }
            other => unreachable!("Expected FileSystem, got {other:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let error: CircuitError = std::io::Error::other("boom").into();
        assert!(matches!(error, CircuitError::FileSystem { .. }));
    }
}
