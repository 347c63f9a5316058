//! Shared test utilities for scout.

pub mod fixtures;

#[cfg(test)]
pub mod arbitrary;
