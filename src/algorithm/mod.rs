/// Localized repair of rejected or failing layouts
pub mod correction;
/// Edit/test/feedback state machine
pub mod editor;
/// Persisted accept/reject verdict
pub mod feedback;
/// Random diagram generation with rejection bias
pub mod generator;
/// Structural circuit validity rules
pub mod tester;
/// Unattended training rounds
pub mod trainer;
