use crate::domain::model::PortParam;
use serde_json::Value;

/// Normalizes one raw parameter the way Drone plugins conventionally accept
/// lists: a JSON parse is attempted first and its result used when it yields
/// a truthy value; anything else (including malformed JSON, deliberately)
/// falls back to a comma split with trimmed fields.
pub(crate) fn convert_param(raw: &str) -> Value {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if is_truthy(&value) {
            return value;
        }
    }

    Value::Array(
        raw.split(',')
            .map(|part| Value::String(part.trim().to_string()))
            .collect(),
    )
}

// JS-style truthiness, kept for parity with the upstream plugin contract.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Address-range parameter: always a list of strings, a scalar result is
/// wrapped into a one-element list.
pub(crate) fn string_list(raw: &str) -> Vec<String> {
    elements(convert_param(raw))
        .into_iter()
        .map(|value| scalar_text(&value))
        .collect()
}

/// Port parameter: list of tagged port values, shape decided here once.
pub(crate) fn port_list(raw: &str) -> Vec<PortParam> {
    elements(convert_param(raw))
        .into_iter()
        .map(port_param)
        .collect()
}

fn elements(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

fn port_param(value: Value) -> PortParam {
    match value {
        Value::Object(map) => PortParam::Range {
            from_port: map.get("from_port").cloned(),
            to_port: map.get("to_port").cloned(),
            protocol: map.get("protocol").map(|v| scalar_text(v)),
        },
        other => PortParam::Scalar(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comma_separated_list_is_split_and_trimmed() {
        let cidrs = string_list("112.23.4.24/32, 5.23.5.1/32 ,230.2.43.0/24");
        assert_eq!(
            cidrs,
            vec!["112.23.4.24/32", "5.23.5.1/32", "230.2.43.0/24"]
        );
    }

    #[test]
    fn test_json_array_is_used_as_is() {
        let cidrs = string_list(r#"["10.0.0.0/24","10.0.1.0/24"]"#);
        assert_eq!(cidrs, vec!["10.0.0.0/24", "10.0.1.0/24"]);
    }

    #[test]
    fn test_malformed_json_falls_back_to_comma_split() {
        let cidrs = string_list(r#"{"oops": no quotes}"#);
        assert_eq!(cidrs, vec![r#"{"oops": no quotes}"#]);
    }

    #[test]
    fn test_scalar_json_value_becomes_single_element() {
        let ports = port_list("80");
        assert_eq!(ports, vec![PortParam::Scalar(json!(80))]);
    }

    #[test]
    fn test_comma_separated_ports_become_scalars() {
        let ports = port_list("80,443");
        assert_eq!(
            ports,
            vec![
                PortParam::Scalar(json!("80")),
                PortParam::Scalar(json!("443")),
            ]
        );
    }

    #[test]
    fn test_json_port_objects_become_ranges() {
        let ports = port_list(r#"[{"from_port":80,"to_port":81,"protocol":"tcp"},443]"#);
        assert_eq!(
            ports,
            vec![
                PortParam::Range {
                    from_port: Some(json!(80)),
                    to_port: Some(json!(81)),
                    protocol: Some("tcp".to_string()),
                },
                PortParam::Scalar(json!(443)),
            ]
        );
    }

    #[test]
    fn test_port_object_with_missing_bounds_keeps_absence() {
        let ports = port_list(r#"[{"protocol":"tcp","to_port":"321"}]"#);
        assert_eq!(
            ports,
            vec![PortParam::Range {
                from_port: None,
                to_port: Some(json!("321")),
                protocol: Some("tcp".to_string()),
            }]
        );
    }
}
