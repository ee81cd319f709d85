// Integration tests for pgtrail

pub mod cli;
