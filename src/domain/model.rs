use serde::Serialize;
use serde_json::Value;

/// A single port parameter after normalization. The shape is decided once,
/// at the configuration boundary: a bare scalar applies the same value to
/// both bounds, a structured range carries explicit bounds and an optional
/// protocol. Bounds stay loosely typed so the validator can report a missing
/// key and a non-numeric value as distinct failures.
#[derive(Debug, Clone, PartialEq)]
pub enum PortParam {
    Scalar(Value),
    Range {
        from_port: Option<Value>,
        to_port: Option<Value>,
        protocol: Option<String>,
    },
}

/// Number coercion for port bounds. Accepts JSON numbers and numeric
/// strings; everything else is rejected by validation.
pub(crate) fn port_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

/// One expanded traffic rule, serialized with the CloudFormation property
/// names the template expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficRule {
    #[serde(rename = "CidrIp")]
    pub cidr_ip: String,
    #[serde(rename = "FromPort")]
    pub from_port: i64,
    #[serde(rename = "ToPort")]
    pub to_port: i64,
    #[serde(rename = "IpProtocol")]
    pub ip_protocol: String,
}

/// Renderer payload for the security-group template. The rule lists are
/// skipped entirely when absent; the template's conditional sections key off
/// field presence, not emptiness.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroupSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "VpcId")]
    pub vpc_id: String,
    #[serde(
        rename = "SecurityGroupIngress",
        skip_serializing_if = "Option::is_none"
    )]
    pub ingress: Option<Vec<TrafficRule>>,
    #[serde(rename = "SecurityGroupEgress", skip_serializing_if = "Option::is_none")]
    pub egress: Option<Vec<TrafficRule>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

pub const DEFAULT_REGION: &str = "eu-west-1";

/// Required by CloudFormation to allow named-IAM resource creation.
pub const CAPABILITIES: [&str; 2] = ["CAPABILITY_NAMED_IAM", "CAPABILITY_IAM"];

/// Everything the deployment invoker needs for one stack operation. Built
/// once, never mutated afterwards. When `credentials` is `None` the invoker
/// falls back to the ambient provider chain (instance/task IAM role).
#[derive(Debug, Clone, PartialEq)]
pub struct DeployRequest {
    pub name: String,
    pub template_path: String,
    pub region: String,
    pub credentials: Option<AwsCredentials>,
    pub capabilities: &'static [&'static str],
}
