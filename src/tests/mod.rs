//! Test suite for the content model
//!
//! This module organizes tests into logical groups: the block envelope,
//! schema consistency across all block types, end-to-end editing flows, and
//! property-based checks of the edit protocol.

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod schema_tests;
