pub mod engine;
pub mod pipeline;
pub mod rules;
pub mod validate;

pub use crate::domain::model::{DeployRequest, PortParam, SecurityGroupSpec, TrafficRule};
pub use crate::domain::ports::{Deployer, Pipeline, Storage};
pub use crate::utils::error::Result;
