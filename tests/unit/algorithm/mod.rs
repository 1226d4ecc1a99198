/// Verdict encoding and the persisted feedback record
pub mod feedback;
/// Seeded selection and biased random diagrams
pub mod generator;
/// Structural rule evaluation
pub mod tester;
