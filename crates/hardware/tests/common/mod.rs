//! Shared test infrastructure.

/// Instruction word encoders.
pub mod builder;


/// `mockall` doubles for the core's external traits.
pub mod mocks;
