//! leaklens-analytics: summary aggregation over an ordered transaction list
//! and the deterministic budgeting-advice composer.

pub mod advice;
pub mod summary;

pub use advice::{compose_advice, AdviceResponse};
pub use summary::compute_summary;
