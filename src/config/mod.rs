pub mod params;

use std::collections::HashMap;

use crate::domain::model::{AwsCredentials, DeployRequest, PortParam, CAPABILITIES, DEFAULT_REGION};

/// Plugin configuration, populated once from the process environment at the
/// boundary. Every field that the environment may leave out is an `Option`;
/// the validator decides which absences are fatal.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub vpc_id: Option<String>,
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// `DRONE_YAML_VERIFIED`; an absent flag means the pipeline is trusted.
    pub yaml_verified: bool,
    /// `PLUGIN_DEBUG`; switches the log filter to debug level.
    pub debug: bool,
    pub ingress_cidrs: Option<Vec<String>>,
    pub ingress_ports: Option<Vec<PortParam>>,
    pub egress_cidrs: Option<Vec<String>>,
    pub egress_ports: Option<Vec<PortParam>>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            vpc_id: None,
            region: None,
            access_key: None,
            secret_key: None,
            yaml_verified: true,
            debug: false,
            ingress_cidrs: None,
            ingress_ports: None,
            egress_cidrs: None,
            egress_ports: None,
        }
    }
}

impl PluginConfig {
    /// Reads the `PLUGIN_*` variables out of the environment map. Port and
    /// CIDR parameters are normalized here (JSON or comma-separated, see
    /// [`params`]); this never fails, malformed values surface later in
    /// validation.
    pub fn from_env(env: &HashMap<String, String>) -> Self {
        Self {
            name: env.get("PLUGIN_NAME").cloned(),
            description: env.get("PLUGIN_DESCRIPTION").cloned(),
            vpc_id: env.get("PLUGIN_VPCID").cloned(),
            region: env.get("PLUGIN_REGION").cloned(),
            access_key: env.get("PLUGIN_ACCESS_KEY").cloned(),
            secret_key: env.get("PLUGIN_SECRET_KEY").cloned(),
            yaml_verified: env
                .get("DRONE_YAML_VERIFIED")
                .map(|raw| parse_flag(raw))
                .unwrap_or(true),
            debug: env
                .get("PLUGIN_DEBUG")
                .map(|raw| parse_flag(raw))
                .unwrap_or(false),
            ingress_cidrs: env.get("PLUGIN_INGRESS_CIDRS").map(|raw| params::string_list(raw)),
            ingress_ports: env.get("PLUGIN_INGRESS_PORTS").map(|raw| params::port_list(raw)),
            egress_cidrs: env.get("PLUGIN_EGRESS_CIDRS").map(|raw| params::string_list(raw)),
            egress_ports: env.get("PLUGIN_EGRESS_PORTS").map(|raw| params::port_list(raw)),
        }
    }

    /// Builds the immutable deployment request. Region falls back to
    /// [`DEFAULT_REGION`]; explicit credentials are attached only when both
    /// keys are present and non-empty, otherwise the invoker relies on the
    /// ambient IAM identity.
    pub fn deploy_request(&self, template_path: &str) -> DeployRequest {
        let credentials = match (&self.access_key, &self.secret_key) {
            (Some(access), Some(secret)) if !access.is_empty() && !secret.is_empty() => {
                Some(AwsCredentials {
                    access_key_id: access.clone(),
                    secret_access_key: secret.clone(),
                })
            }
            _ => None,
        };

        DeployRequest {
            name: self.name.clone().unwrap_or_default(),
            template_path: template_path.to_string(),
            region: self
                .region
                .clone()
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            credentials,
            capabilities: &CAPABILITIES,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(raw.trim().to_ascii_lowercase().as_str(), "false" | "0" | "")
}
