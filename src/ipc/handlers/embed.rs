use crate::embed::PortalComponentRegistry;
use crate::ipc::error::{err, ok, portal_err};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn no_embed(req: &Request) -> serde_json::Value {
    err(&req.id, "no_embed", "no portal view is open", None)
}

fn handle_embed_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let portal = match helpers::param_portal(req, "portal") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let s = match helpers::session_mut(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match s.open_embed(portal) {
        Ok(page) => {
            tracing::info!(portal = %portal, "portal view opened");
            ok(&req.id, json!({ "page": page }))
        }
        Err(e) => portal_err(&req.id, &e),
    }
}

fn handle_embed_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let s = match helpers::session(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match s.embed() {
        Some(page) => ok(&req.id, json!({ "page": page })),
        None => no_embed(req),
    }
}

fn handle_embed_select_tab(state: &mut AppState, req: &Request) -> serde_json::Value {
    let tab = match helpers::param_str(req, "tab") {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let s = match helpers::session_mut(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let Some(page) = s.embed_mut() else {
        return no_embed(req);
    };
    match page.select(tab) {
        Ok(tab_state) => ok(&req.id, json!({ "tab": tab, "tabState": tab_state })),
        Err(e) => portal_err(&req.id, &e),
    }
}

fn handle_embed_resolve(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ticket) = req.params.get("ticket").and_then(|v| v.as_u64()) else {
        return err(&req.id, "bad_params", "missing ticket", None);
    };
    let s = match helpers::session_mut(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let Some(page) = s.embed_mut() else {
        return no_embed(req);
    };
    match page.resolve(ticket, &PortalComponentRegistry) {
        Ok(slot) => ok(&req.id, json!({ "slot": slot })),
        Err(e) => portal_err(&req.id, &e),
    }
}

fn handle_embed_return(state: &mut AppState, req: &Request) -> serde_json::Value {
    let s = match helpers::session_mut(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if s.embed().is_none() {
        return no_embed(req);
    }
    let from_portal = s.context().current();
    let outcome = match s.return_to_admin() {
        Ok(o) => o,
        Err(e) => return portal_err(&req.id, &e),
    };
    tracing::info!("portal view closed, returned to admin");
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
        "embed.open" => Some(handle_embed_open(state, req)),
        "embed.get" => Some(handle_embed_get(state, req)),
        "embed.selectTab" => Some(handle_embed_select_tab(state, req)),
        "embed.resolve" => Some(handle_embed_resolve(state, req)),
        "embed.returnToAdmin" => Some(handle_embed_return(state, req)),
        _ => None,
    }
}
