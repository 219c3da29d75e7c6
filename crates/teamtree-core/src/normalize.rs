//! Normalization of raw API records into the canonical [`Node`] tree.
//!
//! The upstream endpoint is loose about key naming: ids arrive as
//! `user_id` or `id`, nesting as `children` or `downline`, and the
//! metric keys mix cases (`total_investment`, `Total_Income`,
//! `This_Month_Income`). Everything funnels through one precedence
//! rule here so the rest of the pipeline only ever sees [`Node`].

use crate::{Member, Metrics, Node, NodeId};
use serde_json::Value;

/// Convert a raw API record into a canonical tree.
///
/// Returns `None` for `null` or non-object input, the explicit
/// "no data" state rather than a fault. Missing display fields default to the
/// empty string, missing metrics to zero.
///
/// Child key precedence: when a `children` key is *present* (even as
/// `[]` or a non-array value) it is used and `downline` is ignored;
/// `downline` is only consulted when `children` is absent entirely.
pub fn normalize(value: &Value) -> Option<Node> {
    let record = value.as_object()?;
    record_id(record).map(|id| build_node(id, record))
}

fn build_node(id: NodeId, record: &serde_json::Map<String, Value>) -> Node {
    let member = Member {
        name: string_field(record, "name"),
        phone: string_field(record, "phone"),
        email: string_field(record, "email"),
        referral_code: string_field(record, "referral_code"),
        metrics: Metrics {
            total_investment: number_field(record, "total_investment"),
            total_income: number_field(record, "Total_Income"),
            this_month_income: number_field(record, "This_Month_Income"),
        },
    };

    let mut children = Vec::new();
    for child in child_records(record) {
        let Some(child_record) = child.as_object() else {
            continue;
        };
        match record_id(child_record) {
            Some(child_id) => children.push(build_node(child_id, child_record)),
            None => {
                tracing::warn!("dropping child record without user_id/id under node {}", id);
            }
        }
    }

    Node {
        id,
        member,
        children,
    }
}

/// `user_id` wins over `id`; both accept a JSON number or string.
fn record_id(record: &serde_json::Map<String, Value>) -> Option<NodeId> {
    record
        .get("user_id")
        .and_then(id_value)
        .or_else(|| record.get("id").and_then(id_value))
}

fn id_value(value: &Value) -> Option<NodeId> {
    match value {
        Value::Number(n) => Some(NodeId(n.to_string())),
        Value::String(s) if !s.is_empty() => Some(NodeId(s.clone())),
        _ => None,
    }
}

fn child_records(record: &serde_json::Map<String, Value>) -> &[Value] {
    let slot = match record.get("children") {
        // Presence of the key decides, not its value: a present but
        // empty or malformed `children` still masks `downline`.
        Some(value) => Some(value),
        None => record.get("downline"),
    };
    match slot.and_then(Value::as_array) {
        Some(list) => list.as_slice(),
        None => &[],
    }
}

fn string_field(record: &serde_json::Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Metrics arrive as numbers or as numeric strings; anything else is 0.
fn number_field(record: &serde_json::Map<String, Value>, key: &str) -> f64 {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
