use crate::breadcrumbs;
use crate::ipc::error::ok;
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

/// Location from params, else the session's current location.
fn location_of(state: &AppState, req: &Request) -> Result<String, serde_json::Value> {
    if let Some(l) = req.params.get("location").and_then(|v| v.as_str()) {
        return Ok(l.to_string());
    }
    helpers::session(state, req).map(|s| s.location().to_string())
}

fn handle_generate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let items = match helpers::param_items(req, "items") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    // An explicit list ignores the location entirely.
    let location = match &items {
        Some(_) => String::new(),
        None => match location_of(state, req) {
            Ok(l) => l,
            Err(resp) => return resp,
        },
    };
    let labels = helpers::label_dictionary(state);
    let home = helpers::home_anchor(state);
    let trail = breadcrumbs::generate(&location, items.as_deref(), &labels, &home);
    ok(&req.id, json!({ "items": trail }))
}

fn handle_render(state: &mut AppState, req: &Request) -> serde_json::Value {
    let items = match helpers::param_items(req, "items") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let location = match &items {
        Some(_) => String::new(),
        None => match location_of(state, req) {
            Ok(l) => l,
            Err(resp) => return resp,
        },
    };
    let labels = helpers::label_dictionary(state);
    let home = helpers::home_anchor(state);
    let view = breadcrumbs::render(&location, items.as_deref(), &labels, &home);
    ok(&req.id, json!(view))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "breadcrumbs.generate" => Some(handle_generate(state, req)),
        "breadcrumbs.render" => Some(handle_render(state, req)),
        _ => None,
    }
}
