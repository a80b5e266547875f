use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_router_navigate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match helpers::param_str(req, "path") {
        Ok(p) => p.trim(),
        Err(resp) => return resp,
    };
    if !path.starts_with('/') {
        return err(&req.id, "bad_params", "path must start with /", None);
    }
    let s = match helpers::session_mut(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    s.navigate(path);
    ok(
        &req.id,
        json!({
            "location": s.location(),
            "portal": s.context().current(),
        }),
    )
}

fn handle_router_location(state: &mut AppState, req: &Request) -> serde_json::Value {
    match helpers::session(state, req) {
        Ok(s) => ok(
            &req.id,
            json!({
                "location": s.location(),
                "portal": s.context().current(),
            }),
        ),
        Err(resp) => resp,
    }
}

fn handle_router_history(state: &mut AppState, req: &Request) -> serde_json::Value {
    match helpers::session(state, req) {
        Ok(s) => ok(&req.id, json!({ "entries": s.history().entries() })),
        Err(resp) => resp,
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "router.navigate" => Some(handle_router_navigate(state, req)),
        "router.location" => Some(handle_router_location(state, req)),
        "router.history" => Some(handle_router_history(state, req)),
        _ => None,
    }
}
