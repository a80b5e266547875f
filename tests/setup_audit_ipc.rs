mod test_support;

use serde_json::json;
use test_support::{request_err, request_ok, spawn_sidecar, temp_dir};

#[test]
fn setup_defaults_and_validation() {
    let workspace = temp_dir("portald-setup-defaults");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    assert_eq!(
        request_err(&mut stdin, &mut reader, "1", "setup.get", json!({})),
        "no_workspace"
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let setup = request_ok(&mut stdin, &mut reader, "3", "setup.get", json!({}));
    assert_eq!(
        setup,
        json!({
            "routing": { "matchMode": "prefix" },
            "breadcrumbs": { "homeLabel": "Dashboard", "homeAnchor": "root" },
            "audit": { "enabled": true, "maxRecords": 5000 }
        })
    );

    for (i, (section, patch)) in [
        ("routing", json!({ "matchMode": "fuzzy" })),
        ("routing", json!({ "strict": true })),
        ("breadcrumbs", json!({ "homeLabel": "" })),
        ("breadcrumbs", json!({ "homeAnchor": "tenant" })),
        ("audit", json!({ "maxRecords": 5 })),
        ("audit", json!({ "enabled": "yes" })),
        ("printer", json!({})),
    ]
    .into_iter()
    .enumerate()
    {
        assert_eq!(
            request_err(
                &mut stdin,
                &mut reader,
                &format!("bad-{i}"),
                "setup.update",
                json!({ "section": section, "patch": patch }),
            ),
            "bad_params",
            "{section} {patch}"
        );
    }

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "setup.update",
        json!({ "section": "routing", "patch": { "matchMode": "SEGMENT" } }),
    );
    let setup = request_ok(&mut stdin, &mut reader, "5", "setup.get", json!({}));
    assert_eq!(setup.pointer("/routing/matchMode"), Some(&json!("segment")));

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn switches_are_audited_when_enabled() {
    let workspace = temp_dir("portald-audit");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "session.open",
        json!({ "role": "admin", "location": "/admin/courses" }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "portal.switch.toggle",
        json!({ "portal": "hub" }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "portal.switch.toggle",
        json!({ "portal": "hub" }),
    );

    let audit = request_ok(&mut stdin, &mut reader, "5", "audit.list", json!({}));
    let records = audit["records"].as_array().expect("records");
    assert_eq!(records.len(), 2);
    // Newest first.
    assert_eq!(records[0]["transition"], "left");
    assert_eq!(records[0]["fromPortal"], "hub");
    assert_eq!(records[0]["toPortal"], "admin");
    assert_eq!(records[0]["navigatedTo"], "/admin/dashboard");
    assert_eq!(records[1]["transition"], "entered");
    assert_eq!(records[1]["role"], "admin");
    assert_eq!(records[1]["fromLocation"], "/admin/courses");
    assert_eq!(records[1]["matchedPrefix"], "/admin/courses");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "setup.update",
        json!({ "section": "audit", "patch": { "enabled": false } }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "portal.switch.toggle",
        json!({ "portal": "teacher" }),
    );
    let audit = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "audit.list",
        json!({ "limit": 10 }),
    );
    assert_eq!(audit["records"].as_array().map(|r| r.len()), Some(2));

    assert_eq!(
        request_err(
            &mut stdin,
            &mut reader,
            "9",
            "audit.list",
            json!({ "limit": 0 }),
        ),
        "bad_params"
    );

    let _ = std::fs::remove_dir_all(workspace);
}
