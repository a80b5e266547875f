use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Map, Value};

#[derive(Clone, Copy)]
pub(crate) enum SetupSection {
    Routing,
    Breadcrumbs,
    Audit,
}

impl SetupSection {
    const ALL: [SetupSection; 3] = [Self::Routing, Self::Breadcrumbs, Self::Audit];

    fn parse(s: &str) -> Option<Self> {
        match s {
            "routing" => Some(Self::Routing),
            "breadcrumbs" => Some(Self::Breadcrumbs),
            "audit" => Some(Self::Audit),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Routing => "routing",
            Self::Breadcrumbs => "breadcrumbs",
            Self::Audit => "audit",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Routing => "setup.routing",
            Self::Breadcrumbs => "setup.breadcrumbs",
            Self::Audit => "setup.audit",
        }
    }
}

fn default_section(section: SetupSection) -> Value {
    match section {
        SetupSection::Routing => json!({
            "matchMode": "prefix"
        }),
        SetupSection::Breadcrumbs => json!({
            "homeLabel": "Dashboard",
            "homeAnchor": "root"
        }),
        SetupSection::Audit => json!({
            "enabled": true,
            "maxRecords": 5000
        }),
    }
}

fn as_object_mut(value: &mut Value) -> Result<&mut Map<String, Value>, String> {
    value
        .as_object_mut()
        .ok_or_else(|| "internal setup object must be a JSON object".to_string())
}

fn parse_bool(v: &Value, key: &str) -> Result<bool, String> {
    v.as_bool().ok_or_else(|| format!("{} must be boolean", key))
}

fn parse_i64_range(v: &Value, key: &str, min: i64, max: i64) -> Result<i64, String> {
    let n = v
        .as_i64()
        .ok_or_else(|| format!("{} must be integer", key))?;
    if !(min..=max).contains(&n) {
        return Err(format!("{} must be in {}..={}", key, min, max));
    }
    Ok(n)
}

fn parse_string_len(
    v: &Value,
    key: &str,
    min_len: usize,
    max_len: usize,
) -> Result<String, String> {
    let s = v.as_str().ok_or_else(|| format!("{} must be string", key))?;
    let s = s.trim();
    let n = s.chars().count();
    if n < min_len || n > max_len {
        return Err(format!("{} length must be in {}..={}", key, min_len, max_len));
    }
    Ok(s.to_string())
}

fn parse_choice(v: &Value, key: &str, choices: &[&str]) -> Result<String, String> {
    let s = parse_string_len(v, key, 1, 32)?.to_ascii_lowercase();
    if !choices.contains(&s.as_str()) {
        return Err(format!("{} must be one of: {}", key, choices.join(", ")));
    }
    Ok(s)
}

fn merge_section_patch(
    section: SetupSection,
    current: &mut Value,
    patch: &Map<String, Value>,
) -> Result<(), String> {
    let obj = as_object_mut(current)?;
    for (k, v) in patch {
        match section {
            SetupSection::Routing => match k.as_str() {
                "matchMode" => {
                    let m = parse_choice(v, k, &["prefix", "segment"])?;
                    obj.insert(k.clone(), Value::String(m));
                }
                _ => return Err(format!("unknown routing field: {}", k)),
            },
            SetupSection::Breadcrumbs => match k.as_str() {
                "homeLabel" => {
                    obj.insert(k.clone(), Value::String(parse_string_len(v, k, 1, 40)?));
                }
                "homeAnchor" => {
                    let a = parse_choice(v, k, &["root", "portal"])?;
                    obj.insert(k.clone(), Value::String(a));
                }
                _ => return Err(format!("unknown breadcrumbs field: {}", k)),
            },
            SetupSection::Audit => match k.as_str() {
                "enabled" => {
                    obj.insert(k.clone(), Value::Bool(parse_bool(v, k)?));
                }
                "maxRecords" => {
                    obj.insert(k.clone(), Value::from(parse_i64_range(v, k, 100, 100_000)?));
                }
                _ => return Err(format!("unknown audit field: {}", k)),
            },
        }
    }
    Ok(())
}

/// Defaults with any saved values layered on top. Without a workspace the
/// defaults apply.
pub(crate) fn load_section(
    conn: Option<&rusqlite::Connection>,
    section: SetupSection,
) -> anyhow::Result<Value> {
    let mut current = default_section(section);
    let Some(conn) = conn else {
        return Ok(current);
    };
    if let Some(saved) = db::settings_get_json(conn, section.key())? {
        if let Some(saved_obj) = saved.as_object() {
            // Malformed historical values must not block the portal layer.
            if let Err(e) = merge_section_patch(section, &mut current, saved_obj) {
                tracing::warn!(section = section.name(), error = %e, "ignoring saved setup");
                current = default_section(section);
            }
        }
    }
    Ok(current)
}

fn handle_setup_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let mut out = Map::new();
    for section in SetupSection::ALL {
        match load_section(Some(conn), section) {
            Ok(v) => {
                out.insert(section.name().to_string(), v);
            }
            Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
        }
    }
    ok(&req.id, Value::Object(out))
}

fn handle_setup_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(section_raw) = req.params.get("section").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing section", None);
    };
    let Some(section) = SetupSection::parse(section_raw) else {
        return err(&req.id, "bad_params", "unknown section", None);
    };
    let Some(patch_obj) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "patch must be an object", None);
    };

    let mut current = match load_section(Some(conn), section) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
    };
    if let Err(msg) = merge_section_patch(section, &mut current, patch_obj) {
        return err(&req.id, "bad_params", msg, None);
    }
    if let Err(e) = db::settings_set_json(conn, section.key(), &current) {
        return err(&req.id, "db_update_failed", e.to_string(), None);
    }
    tracing::info!(section = section.name(), "setup updated");
    ok(&req.id, json!({ "ok": true, (section.name()): current }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "setup.get" => Some(handle_setup_get(state, req)),
        "setup.update" => Some(handle_setup_update(state, req)),
        _ => None,
    }
}
