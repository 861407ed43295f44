//! E2E test suite entry point.
//!
//! Drives the real binary against throwaway repositories, with shell scripts
//! standing in for `npm` and `gh`.

#![cfg(unix)]

mod batch_workflow;
mod fixture;
mod setup_workflow;
