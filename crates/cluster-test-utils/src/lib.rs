//! Shared test utilities for the cluster inventory workspace.
//!
//! This crate provides cluster-root fixtures so crate test suites do not
//! each hand-roll config directories. It is a dev-dependency only.
//!
//! # Modules
//!
//! - [`cluster`]: [`TestCluster`](cluster::TestCluster) builder for cluster roots

pub mod cluster;
