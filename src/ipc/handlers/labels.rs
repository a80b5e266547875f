use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::labels;
use serde_json::json;

fn handle_labels_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let overrides = match state.db.as_ref() {
        Some(conn) => match db::label_overrides_list(conn) {
            Ok(v) => v,
            Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
        },
        None => Vec::new(),
    };
    let dict = helpers::label_dictionary(state);
    let labels: Vec<_> = dict
        .iter()
        .map(|(segment, label)| {
            json!({
                "segment": segment,
                "label": label,
                "overridden": overrides.iter().any(|o| o.segment == segment),
                "standard": labels::is_standard_segment(segment),
            })
        })
        .collect();
    ok(&req.id, json!({ "labels": labels, "overrides": overrides }))
}

fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.len() <= 64
        && !segment.contains(['/', '?', '#'])
        && !segment.chars().any(char::is_whitespace)
}

fn handle_labels_upsert(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let segment = match helpers::param_str(req, "segment") {
        Ok(s) => s.trim(),
        Err(resp) => return resp,
    };
    if !valid_segment(segment) {
        return err(
            &req.id,
            "bad_params",
            "segment must be a single non-empty path segment",
            None,
        );
    }
    let label = match helpers::param_str(req, "label") {
        Ok(l) => l.trim(),
        Err(resp) => return resp,
    };
    if label.is_empty() || label.chars().count() > 80 {
        return err(&req.id, "bad_params", "label length must be in 1..=80", None);
    }
    if let Err(e) = db::label_override_upsert(conn, segment, label) {
        return err(&req.id, "db_update_failed", e.to_string(), None);
    }
    tracing::info!(segment = %segment, label = %label, "label override saved");
    ok(&req.id, json!({ "segment": segment, "label": label }))
}

fn handle_labels_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let segment = match helpers::param_str(req, "segment") {
        Ok(s) => s.trim(),
        Err(resp) => return resp,
    };
    match db::label_override_delete(conn, segment) {
        Ok(deleted) => ok(&req.id, json!({ "segment": segment, "deleted": deleted })),
        Err(e) => err(&req.id, "db_update_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "labels.list" => Some(handle_labels_list(state, req)),
        "labels.upsert" => Some(handle_labels_upsert(state, req)),
        "labels.delete" => Some(handle_labels_delete(state, req)),
        _ => None,
    }
}
