//! Integration tests for the incremental generators

mod cli_commands;
mod copy_generator;
mod test_utils;
