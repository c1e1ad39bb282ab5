//! Shared helpers for the integration tests
//!
//! Each test binary uses a different subset.

#![allow(dead_code)]

pub mod config;
pub mod mock_planner;
pub mod mock_venice;
pub mod server;
