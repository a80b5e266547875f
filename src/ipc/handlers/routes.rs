use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::routes::MatchMode;
use serde_json::json;

fn handle_routes_resolve(state: &mut AppState, req: &Request) -> serde_json::Value {
    let target = match helpers::param_portal(req, "portal") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    // Without an explicit location, resolve from where the session is.
    let location = match req.params.get("location").and_then(|v| v.as_str()) {
        Some(l) => l.to_string(),
        None => match helpers::session(state, req) {
            Ok(s) => s.location().to_string(),
            Err(resp) => return resp,
        },
    };
    let mode = match req.params.get("matchMode").and_then(|v| v.as_str()) {
        Some(raw) => match MatchMode::parse(raw) {
            Some(m) => m,
            None => {
                return err(
                    &req.id,
                    "bad_params",
                    "matchMode must be one of: prefix, segment",
                    None,
                )
            }
        },
        None => helpers::match_mode(state),
    };

    let resolution = state.routes.resolve_detailed(&location, target, mode);
    tracing::debug!(
        location = %location,
        portal = %target,
        path = %resolution.path,
        fallback = resolution.fallback,
        "route resolved"
    );
    ok(
        &req.id,
        json!({
            "location": location,
            "portal": target,
            "matchMode": mode,
            "path": resolution.path,
            "matchedPrefix": resolution.matched_prefix,
            "fallback": resolution.fallback,
        }),
    )
}

fn handle_routes_table(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "matchMode": helpers::match_mode(state),
            "entries": state.routes.entries(),
            "ambiguities": state.routes.ambiguities(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "routes.resolve" => Some(handle_routes_resolve(state, req)),
        "routes.table" => Some(handle_routes_table(state, req)),
        _ => None,
    }
}
