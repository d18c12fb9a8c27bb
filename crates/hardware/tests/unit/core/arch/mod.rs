//! # Architectural State Tests

/// Float register aliasing.
pub mod fpr;

/// Register file speculation and `$zero`.
pub mod registers;
