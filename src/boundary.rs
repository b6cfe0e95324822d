//! Lifecycle seam for the external clustering collaborators.
//!
//! The oscillatory-network and partitional clustering subsystems are not
//! implemented in this crate; they are reached through a narrow
//! create → process → destroy lifecycle with no internal contract. That
//! lifecycle maps onto owned objects behind traits:
//!
//! - [`NetworkFactory::create`] builds a network from a dataset and
//!   backend-specific configuration, returning an exclusively owned
//!   instance, or [`crate::Error::InvalidInput`] for a dataset the backend
//!   rejects.
//! - [`ClusteringNetwork::process`] runs the network once and yields an
//!   owned analysis object.
//! - Destruction is scoped drop on either value; no cyclic references
//!   exist across this boundary.

use crate::error::Result;

/// An opaque clustering network created from a dataset.
///
/// One `process` call corresponds to one run of the external algorithm;
/// the returned analysis is owned by the caller and released on drop.
pub trait ClusteringNetwork {
    /// Runtime options for a single processing run.
    type Options;

    /// The owned result of a processing run.
    type Analysis;

    /// Runs the network once over its dataset.
    fn process(&mut self, options: &Self::Options) -> Self::Analysis;
}

/// Builds clustering networks from raw datasets.
pub trait NetworkFactory {
    /// Backend-specific creation configuration.
    type Config;

    /// The network type this factory creates.
    type Network: ClusteringNetwork;

    /// Creates an exclusively owned network from a dataset of
    /// d-dimensional samples.
    fn create(&self, dataset: &[Vec<f64>], config: &Self::Config) -> Result<Self::Network>;
}
