pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::cloudformation::CloudFormationDeployer;
pub use crate::adapters::storage::LocalStorage;
pub use crate::config::PluginConfig;
pub use crate::core::{engine::DeployEngine, pipeline::SgPipeline};
pub use crate::utils::error::{PluginError, Result};
