//! Ferrous Galaxy Infrastructure Layer
pub mod discovery;
pub mod galaxy;
pub mod metrics;
pub mod storage;
