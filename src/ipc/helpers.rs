use crate::breadcrumbs::{BreadcrumbItem, HomeAnchor};
use crate::db;
use crate::ipc::error::{err, portal_err};
use crate::ipc::handlers::setup::{load_section, SetupSection};
use crate::ipc::types::{AppState, Request};
use crate::labels::LabelDictionary;
use crate::portal::PortalIdentity;
use crate::routes::MatchMode;
use crate::session::Session;
use crate::switch::SwitchOutcome;

pub fn param_str<'a>(req: &'a Request, key: &str) -> Result<&'a str, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn param_portal(req: &Request, key: &str) -> Result<PortalIdentity, serde_json::Value> {
    let raw = param_str(req, key)?;
    PortalIdentity::parse(raw).map_err(|e| portal_err(&req.id, &e))
}

/// Explicit breadcrumb override, when the caller sent one.
pub fn param_items(
    req: &Request,
    key: &str,
) -> Result<Option<Vec<BreadcrumbItem>>, serde_json::Value> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| err(&req.id, "bad_params", format!("invalid {}: {}", key, e), None)),
    }
}

pub fn no_session(req: &Request) -> serde_json::Value {
    err(&req.id, "no_session", "open a session first", None)
}

pub fn session<'a>(state: &'a AppState, req: &Request) -> Result<&'a Session, serde_json::Value> {
    state
        .session
        .as_ref()
        .ok_or_else(|| no_session(req))
}

pub fn session_mut<'a>(
    state: &'a mut AppState,
    req: &Request,
) -> Result<&'a mut Session, serde_json::Value> {
    state
        .session
        .as_mut()
        .ok_or_else(|| no_session(req))
}

pub fn match_mode(state: &AppState) -> MatchMode {
    load_section(state.db.as_ref(), SetupSection::Routing)
        .ok()
        .and_then(|v| v.get("matchMode").and_then(|m| m.as_str()).and_then(MatchMode::parse))
        .unwrap_or_default()
}

pub fn home_anchor(state: &AppState) -> HomeAnchor {
    let mut home = HomeAnchor::default();
    let Ok(cfg) = load_section(state.db.as_ref(), SetupSection::Breadcrumbs) else {
        return home;
    };
    if let Some(label) = cfg.get("homeLabel").and_then(|v| v.as_str()) {
        home.label = label.to_string();
    }
    if cfg.get("homeAnchor").and_then(|v| v.as_str()) == Some("portal") {
        if let Some(s) = state.session.as_ref() {
            home.href = s.context().current().dashboard_route();
        }
    }
    home
}

pub fn label_dictionary(state: &AppState) -> LabelDictionary {
    let labels = LabelDictionary::standard();
    let Some(conn) = state.db.as_ref() else {
        return labels;
    };
    match db::label_overrides_list(conn) {
        Ok(rows) => labels.with_overrides(rows.into_iter().map(|r| (r.segment, r.label))),
        Err(e) => {
            tracing::warn!(error = %e, "label overrides unavailable");
            labels
        }
    }
}

/// Best-effort: a failed audit write never fails the switch.
pub fn record_switch(state: &AppState, from_portal: PortalIdentity, outcome: &SwitchOutcome) {
    let (Some(conn), Some(session)) = (state.db.as_ref(), state.session.as_ref()) else {
        return;
    };
    let Ok(cfg) = load_section(Some(conn), SetupSection::Audit) else {
        return;
    };
    if cfg.get("enabled").and_then(|v| v.as_bool()) == Some(false) {
        return;
    }
    let max_records = cfg
        .get("maxRecords")
        .and_then(|v| v.as_i64())
        .unwrap_or(5000);
    let transition = match outcome.transition {
        crate::switch::SwitchTransition::Entered => "entered",
        crate::switch::SwitchTransition::Left => "left",
    };
    let rec = db::NewAuditRecord {
        role: &session.principal().role,
        transition,
        from_portal: from_portal.as_str(),
        to_portal: outcome.portal.as_str(),
        from_location: &outcome.from_location,
        navigated_to: &outcome.navigated_to,
        matched_prefix: outcome.matched_prefix.as_deref(),
    };
    if let Err(e) = db::audit_append(conn, &rec, max_records) {
        tracing::warn!(error = %e, "failed to record portal switch");
    }
}
