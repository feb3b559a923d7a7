//! Integration tests for the take list

mod cli_contracts;
mod round_trip;
mod support;
mod take_tree_properties;
