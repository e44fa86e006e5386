use crate::config::PluginConfig;
use crate::domain::model::{port_number, PortParam, SecurityGroupSpec, TrafficRule};

/// CloudFormation's "all protocols" marker.
const PROTOCOL_ALL: &str = "-1";

/// Cross product of address ranges and port rules, address-major: for each
/// CIDR in order, one rule per port parameter in order. Downstream consumers
/// rely on that ordering. A missing side produces an empty expansion.
pub fn expand_rules(cidrs: Option<&[String]>, ports: Option<&[PortParam]>) -> Vec<TrafficRule> {
    let cidrs = cidrs.unwrap_or_default();
    let ports = ports.unwrap_or_default();

    let mut rules = Vec::with_capacity(cidrs.len() * ports.len());
    for cidr in cidrs {
        for port in ports {
            rules.push(traffic_rule(cidr, port));
        }
    }
    rules
}

fn traffic_rule(cidr: &str, port: &PortParam) -> TrafficRule {
    match port {
        PortParam::Scalar(value) => {
            let bound = port_number(value).unwrap_or_default();
            TrafficRule {
                cidr_ip: cidr.to_string(),
                from_port: bound,
                to_port: bound,
                ip_protocol: PROTOCOL_ALL.to_string(),
            }
        }
        PortParam::Range {
            from_port,
            to_port,
            protocol,
        } => TrafficRule {
            cidr_ip: cidr.to_string(),
            from_port: from_port.as_ref().and_then(port_number).unwrap_or_default(),
            to_port: to_port.as_ref().and_then(port_number).unwrap_or_default(),
            ip_protocol: protocol
                .clone()
                .unwrap_or_else(|| PROTOCOL_ALL.to_string()),
        },
    }
}

/// Builds the renderer payload from a validated configuration. Ingress and
/// egress lists are attached only when their expansion is non-empty; the
/// template skips a section on absence, not on emptiness.
pub fn build_spec(config: &PluginConfig) -> SecurityGroupSpec {
    let ingress = expand_rules(
        config.ingress_cidrs.as_deref(),
        config.ingress_ports.as_deref(),
    );
    let egress = expand_rules(
        config.egress_cidrs.as_deref(),
        config.egress_ports.as_deref(),
    );

    SecurityGroupSpec {
        name: config.name.clone().unwrap_or_default(),
        description: config.description.clone().unwrap_or_default(),
        vpc_id: config.vpc_id.clone().unwrap_or_default(),
        ingress: (!ingress.is_empty()).then_some(ingress),
        egress: (!egress.is_empty()).then_some(egress),
    }
}
