use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::models::boxes::BoxError;
use crate::core::models::group::TopologyError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Topology error: {source}")]
    Topology {
        #[from]
        source: TopologyError,
    },

    #[error("Simulation box error: {source}")]
    Box {
        #[from]
        source: BoxError,
    },

    #[error("Force field error: {source}")]
    ForceField {
        #[from]
        source: ParamLoadError,
    },
}
