//! Tests for verdict persistence in the byte store

#[cfg(test)]
mod tests {
    use circuit_trainer::algorithm::feedback::{
        FeedbackRecord, FeedbackStore, NEGATIVE_BYTE, POSITIVE_BYTE, Verdict,
    };
    use circuit_trainer::io::configuration::{EEPROM_ADDRESS, ERASED_BYTE, STORE_CAPACITY};
    use circuit_trainer::io::store::{MemoryByteStore, PersistentByteStore};
    use circuit_trainer::{CircuitError, Result};

    /// Store whose every access fails, standing in for a faulty device
    struct FailingStore;

    impl PersistentByteStore for FailingStore {
        fn capacity(&self) -> usize {
            16
        }

        fn write(&mut self, address: usize, bytes: &[u8]) -> Result<()> {
            Err(CircuitError::StoreAccess {
                address,
                length: bytes.len(),
                capacity: 0,
            })
        }

        fn read(&self, address: usize, length: usize) -> Result<Vec<u8>> {
            Err(CircuitError::StoreAccess {
                address,
                length,
                capacity: 0,
            })
        }
    }

    fn fresh() -> FeedbackStore<MemoryByteStore> {
        FeedbackStore::new(MemoryByteStore::new(STORE_CAPACITY), EEPROM_ADDRESS)
            .expect("address in range")
    }

    // An erased device has never seen a positive verdict
    #[test]
    fn test_fresh_store_reads_no_feedback() {
        let feedback = fresh();

        assert!(!feedback.get_last_feedback());
        assert_eq!(
            feedback.last_record().ok(),
            Some(FeedbackRecord { positive: false })
        );
    }

    #[test]
    fn test_latest_verdict_wins() {
        let mut feedback = fresh();

        feedback.save_feedback(true).expect("write succeeds");
        assert!(feedback.get_last_feedback());

        feedback.save_feedback(false).expect("write succeeds");
        assert!(!feedback.get_last_feedback());

        feedback.save_feedback(true).expect("write succeeds");
        assert!(feedback.get_last_feedback());
    }

    #[test]
    fn test_record_occupies_one_byte_at_its_address() {
        let mut feedback = FeedbackStore::new(MemoryByteStore::new(8), 5).expect("in range");

        feedback.save_feedback(true).expect("write succeeds");
        let bytes = feedback.into_store().into_bytes();

        assert_eq!(bytes.get(5), Some(&POSITIVE_BYTE));
        assert_eq!(
            bytes.iter().filter(|&&b| b == ERASED_BYTE).count(),
            7,
            "only the record byte should change"
        );
    }

    #[test]
    fn test_verdict_survives_restart() {
        let mut feedback = fresh();
        feedback.save_feedback(true).expect("write succeeds");
        let image = feedback.into_store().into_bytes();

        let restarted = FeedbackStore::new(MemoryByteStore::from_bytes(image), EEPROM_ADDRESS)
            .expect("address in range");

        assert!(restarted.get_last_feedback());
    }

    // Any byte other than the positive marker reads as "no positive feedback"
    #[test]
    fn test_unrecognized_byte_reads_false() {
        for byte in [NEGATIVE_BYTE, 2, 0x7F, ERASED_BYTE] {
            let store = MemoryByteStore::from_bytes(vec![byte; 4]);
            let feedback = FeedbackStore::new(store, 0).expect("address in range");
            assert!(!feedback.get_last_feedback(), "byte {byte:#04x}");
        }
    }

    #[test]
    fn test_address_past_end_is_rejected() {
        let result = FeedbackStore::new(MemoryByteStore::new(4), 4);
        assert!(matches!(result, Err(CircuitError::StoreAccess { .. })));
    }

    #[test]
    fn test_failing_device() {
        let mut feedback = FeedbackStore::new(FailingStore, 0).expect("address in range");

        assert!(!feedback.get_last_feedback());
        assert!(feedback.last_record().is_err());
        assert!(matches!(
            feedback.save_feedback(true),
            Err(CircuitError::StoreAccess { .. })
        ));
    }

    #[test]
    fn test_record_encoding() {
        assert_eq!(FeedbackRecord::from(Verdict::Accepted).encode(), POSITIVE_BYTE);
        assert_eq!(FeedbackRecord::from(Verdict::Rejected).encode(), NEGATIVE_BYTE);
        assert_eq!(FeedbackRecord::decode(POSITIVE_BYTE).verdict(), Verdict::Accepted);
        assert_eq!(Verdict::from_positive(false), Verdict::Rejected);
        assert_eq!(Verdict::Accepted.to_string(), "accepted");
    }
}
