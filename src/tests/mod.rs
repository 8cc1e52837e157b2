//! Comprehensive test suite for the block bundle
//!
//! This module organizes tests into logical groups to help understand
//! different aspects of the bundle.

#[cfg(test)]
mod attribute_tests;
#[cfg(test)]
mod block_tests;
#[cfg(test)]
mod integration;
