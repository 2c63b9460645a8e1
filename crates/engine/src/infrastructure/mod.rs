//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod cloudinary;
pub mod openai;
pub mod persistence;
pub mod ports;

#[cfg(test)]
mod persistence_integration_tests;
