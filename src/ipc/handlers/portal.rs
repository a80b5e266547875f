use crate::ipc::error::{ok, portal_err};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::portal::PORTALS;
use serde_json::json;

fn handle_portal_list(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let portals: Vec<_> = PORTALS
        .iter()
        .map(|d| {
            json!({
                "id": d.id,
                "baseRoute": d.base_route,
                "dashboard": d.id.dashboard_route(),
            })
        })
        .collect();
    ok(&req.id, json!({ "portals": portals }))
}

fn handle_portal_context(state: &mut AppState, req: &Request) -> serde_json::Value {
    let s = match helpers::session(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let ctx = s.context();
    ok(
        &req.id,
        json!({
            "currentPortal": ctx.current(),
            "baseRoute": ctx.descriptor().base_route,
            "revision": ctx.revision(),
        }),
    )
}

fn handle_portal_link(state: &mut AppState, req: &Request) -> serde_json::Value {
    let s = match helpers::session(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let path = match helpers::param_str(req, "path") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    ok(
        &req.id,
        json!({
            "portal": s.context().current(),
            "href": s.context().link(path),
        }),
    )
}

fn handle_switch_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let s = match helpers::session(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let switches: Vec<_> = s
        .switches()
        .map(|sw| {
            json!({
                "portal": sw.target(),
                "impersonating": sw.is_impersonating(),
                "baseRoute": sw.target().base_route(),
            })
        })
        .collect();
    ok(
        &req.id,
        json!({
            "currentPortal": s.context().current(),
            "switches": switches,
        }),
    )
}

fn handle_switch_toggle(state: &mut AppState, req: &Request) -> serde_json::Value {
    let target = match helpers::param_portal(req, "portal") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let mode = helpers::match_mode(state);
    let Some(session) = state.session.as_mut() else {
        return helpers::no_session(req);
    };
    let from_portal = session.context().current();
    let outcome = match session.toggle(target, &state.routes, mode) {
        Ok(o) => o,
        Err(e) => return portal_err(&req.id, &e),
    };
    tracing::info!(
        role = %session.principal().role,
        from_portal = %from_portal,
        to_portal = %outcome.portal,
        navigated_to = %outcome.navigated_to,
        "portal switch"
    );
    let revision = session.context().revision();
    helpers::record_switch(state, from_portal, &outcome);
    ok(
        &req.id,
        json!({
            "outcome": outcome,
            "currentPortal": outcome.portal,
            "location": outcome.navigated_to,
            "revision": revision,
        }),
    )
}

fn handle_return_to_admin(state: &mut AppState, req: &Request) -> serde_json::Value {
    let s = match helpers::session_mut(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let from_portal = s.context().current();
    let outcome = match s.return_to_admin() {
        Ok(o) => o,
        Err(e) => return portal_err(&req.id, &e),
    };
    tracing::info!(from_portal = %from_portal, "returned to admin");
    helpers::record_switch(state, from_portal, &outcome);
    ok(
        &req.id,
        json!({
            "outcome": outcome,
            "currentPortal": outcome.portal,
            "location": outcome.navigated_to,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "portal.list" => Some(handle_portal_list(state, req)),
        "portal.context" => Some(handle_portal_context(state, req)),
        "portal.link" => Some(handle_portal_link(state, req)),
        "portal.switch.list" => Some(handle_switch_list(state, req)),
        "portal.switch.toggle" => Some(handle_switch_toggle(state, req)),
        "portal.returnToAdmin" => Some(handle_return_to_admin(state, req)),
        _ => None,
    }
}
