use crate::config::PluginConfig;
use crate::domain::model::{port_number, PortParam};
use crate::utils::error::{PluginError, Result};
use serde_json::Value;

/// Checks the normalized configuration against the plugin's rule set, in a
/// fixed order, stopping at the first violation. Credential pairing is
/// checked before anything else: an unverified pipeline must never deploy
/// with the ambient IAM identity.
pub fn validate_config(config: &PluginConfig) -> Result<()> {
    if config.secret_key.is_some() && config.access_key.is_none() {
        return Err(PluginError::ConfigError {
            message: "missing AWS access key".to_string(),
        });
    }

    if config.access_key.is_some() && config.secret_key.is_none() {
        return Err(PluginError::ConfigError {
            message: "missing AWS secret key".to_string(),
        });
    }

    if !config.yaml_verified && config.access_key.is_none() && config.secret_key.is_none() {
        return Err(PluginError::ConfigError {
            message: "drone YAML is unverified when not using AWS IAM role".to_string(),
        });
    }

    if config.name.as_deref().unwrap_or("").is_empty() {
        return Err(PluginError::ConfigError {
            message: "name not specified".to_string(),
        });
    }

    if config.vpc_id.as_deref().unwrap_or("").is_empty() {
        return Err(PluginError::ConfigError {
            message: "vpcid not specified".to_string(),
        });
    }

    if let Some(ports) = &config.ingress_ports {
        validate_ports(ports)?;
    }

    if let Some(ports) = &config.egress_ports {
        validate_ports(ports)?;
    }

    Ok(())
}

fn validate_ports(ports: &[PortParam]) -> Result<()> {
    for port in ports {
        match port {
            PortParam::Scalar(value) => validate_port(value)?,
            PortParam::Range {
                from_port, to_port, ..
            } => {
                let (Some(from), Some(to)) = (from_port, to_port) else {
                    return Err(PluginError::ConfigError {
                        message: "port is missing from_port or to_port property".to_string(),
                    });
                };
                validate_port(from)?;
                validate_port(to)?;
            }
        }
    }
    Ok(())
}

fn validate_port(value: &Value) -> Result<()> {
    if port_number(value).is_none() {
        return Err(PluginError::ConfigError {
            message: "port is not a number".to_string(),
        });
    }
    Ok(())
}
