use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::session::{Principal, Session};
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
            "session": state.session.is_some()
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match db::open_db(&path) {
        Ok(conn) => {
            tracing::info!(workspace = %path.display(), "workspace selected");
            state.workspace = Some(path.clone());
            state.db = Some(conn);
            ok(&req.id, json!({ "workspacePath": path.to_string_lossy() }))
        }
        Err(e) => err(&req.id, "db_open_failed", format!("{e:?}"), None),
    }
}

pub(crate) fn session_json(session: &Session) -> serde_json::Value {
    let ctx = session.context();
    json!({
        "principal": session.principal(),
        "canImpersonate": session.principal().can_impersonate(),
        "currentPortal": ctx.current(),
        "baseRoute": ctx.descriptor().base_route,
        "revision": ctx.revision(),
        "location": session.location(),
        "switches": session.switches().collect::<Vec<_>>(),
        "embedPortal": session.embed().map(|e| e.portal()),
    })
}

fn handle_session_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let role = match helpers::param_str(req, "role") {
        Ok(r) => r.trim(),
        Err(resp) => return resp,
    };
    if role.is_empty() {
        return err(&req.id, "bad_params", "role must not be empty", None);
    }
    let principal = Principal {
        role: role.to_string(),
    };
    let location = match req.params.get("location").and_then(|v| v.as_str()) {
        Some(l) => l.to_string(),
        None => principal.home_portal().dashboard_route(),
    };

    let session = Session::open(principal, &location);
    tracing::info!(
        role = %session.principal().role,
        location = %location,
        impersonation = session.principal().can_impersonate(),
        "session opened"
    );
    let resp = ok(&req.id, session_json(&session));
    state.session = Some(session);
    resp
}

fn handle_session_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    match helpers::session(state, req) {
        Ok(s) => ok(&req.id, session_json(s)),
        Err(resp) => resp,
    }
}

fn handle_session_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    let closed = state.session.take().is_some();
    if closed {
        tracing::info!("session closed");
    }
    ok(&req.id, json!({ "closed": closed }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        "session.open" => Some(handle_session_open(state, req)),
        "session.get" => Some(handle_session_get(state, req)),
        "session.close" => Some(handle_session_close(state, req)),
        _ => None,
    }
}
