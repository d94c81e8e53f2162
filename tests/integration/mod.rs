//! Integration tests for snapshot construction and diffing

mod snapshot_build;
mod test_utils;
