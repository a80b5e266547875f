mod test_support;

use serde_json::json;
use test_support::{request_err, request_ok, spawn_sidecar};

#[test]
fn embed_page_mounts_portal_components_lazily() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "session.open",
        json!({ "role": "admin", "location": "/admin/portal-view" }),
    );
    assert_eq!(
        request_err(&mut stdin, &mut reader, "2", "embed.get", json!({})),
        "no_embed"
    );

    let opened = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "embed.open",
        json!({ "portal": "hub" }),
    );
    assert_eq!(opened.pointer("/page/portal"), Some(&json!("hub")));
    assert_eq!(opened.pointer("/page/tabs/0/key"), Some(&json!("dashboard")));
    assert_eq!(opened.pointer("/page/tabs/0/state"), Some(&json!("loading")));
    assert_eq!(opened.pointer("/page/tabs/1/state"), Some(&json!("idle")));
    let ticket = opened
        .pointer("/page/tabs/0/ticket")
        .and_then(|v| v.as_u64())
        .expect("ticket");

    let resolved = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "embed.resolve",
        json!({ "ticket": ticket }),
    );
    assert_eq!(resolved.pointer("/slot/state"), Some(&json!("ready")));
    assert_eq!(
        resolved.pointer("/slot/view/component"),
        Some(&json!("HubDashboard"))
    );
    assert_eq!(
        resolved.pointer("/slot/view/route"),
        Some(&json!("/hub/dashboard"))
    );

    // Embedding never changes the portal context.
    let ctx = request_ok(&mut stdin, &mut reader, "5", "portal.context", json!({}));
    assert_eq!(ctx["currentPortal"], "admin");

    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "embed.selectTab",
        json!({ "tab": "reports" }),
    );
    assert_eq!(selected.pointer("/tabState/state"), Some(&json!("loading")));
    let ticket = selected
        .pointer("/tabState/ticket")
        .and_then(|v| v.as_u64())
        .expect("ticket");
    let resolved = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "embed.resolve",
        json!({ "ticket": ticket }),
    );
    assert_eq!(
        resolved.pointer("/slot/state"),
        Some(&json!("notImplemented"))
    );

    let again = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "embed.selectTab",
        json!({ "tab": "dashboard" }),
    );
    assert_eq!(again.pointer("/tabState/state"), Some(&json!("ready")));

    assert_eq!(
        request_err(
            &mut stdin,
            &mut reader,
            "9",
            "embed.resolve",
            json!({ "ticket": ticket }),
        ),
        "unknown_ticket"
    );
    assert_eq!(
        request_err(
            &mut stdin,
            &mut reader,
            "10",
            "embed.selectTab",
            json!({ "tab": "grades" }),
        ),
        "unknown_tab"
    );

    let back = request_ok(
        &mut stdin,
        &mut reader,
        "11",
        "embed.returnToAdmin",
        json!({}),
    );
    assert_eq!(back["location"], "/admin/dashboard");
    assert_eq!(back["currentPortal"], "admin");
    assert_eq!(
        request_err(&mut stdin, &mut reader, "12", "embed.get", json!({})),
        "no_embed"
    );
}

#[test]
fn admin_portal_cannot_be_embedded() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "session.open",
        json!({ "role": "admin" }),
    );
    assert_eq!(
        request_err(
            &mut stdin,
            &mut reader,
            "2",
            "embed.open",
            json!({ "portal": "admin" }),
        ),
        "not_embeddable"
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "session.open",
        json!({ "role": "student" }),
    );
    assert_eq!(
        request_err(
            &mut stdin,
            &mut reader,
            "4",
            "embed.open",
            json!({ "portal": "teacher" }),
        ),
        "forbidden"
    );
}
