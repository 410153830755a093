//! Codec implementations

pub mod g711;
