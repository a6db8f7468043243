use super::*;
use serde_json::json;

fn inbound(raw: Value) -> ServiceMessage {
    serde_json::from_value(raw).expect("wire message")
}

#[test]
fn decodes_std_out_line() {
    let event = ServiceEvent::try_from(inbound(json!({
        "method": "onStdOut",
        "data": ["hello"]
    })))
    .expect("decode");

    assert_eq!(event, ServiceEvent::StdOut("hello".to_string()));
}

#[test]
fn decodes_script_list_in_order() {
    let event = ServiceEvent::try_from(inbound(json!({
        "method": "onScriptList",
        "data": [["b.py", "a.py"]]
    })))
    .expect("decode");

    assert_eq!(
        event,
        ServiceEvent::ScriptList(vec![ScriptPath::from("b.py"), ScriptPath::from("a.py")])
    );
}

#[test]
fn decodes_status_report_with_extra_fields() {
    let event = ServiceEvent::try_from(inbound(json!({
        "method": "onStatus",
        "data": [{"level": "error", "detail": "boom", "source": "py4j"}]
    })))
    .expect("decode");

    let ServiceEvent::Status(report) = event else {
        panic!("expected status event");
    };
    assert!(report.is_error());
    assert_eq!(report.message(), Some("boom"));
}

#[test]
fn unknown_method_is_rejected_by_name() {
    let err = ServiceEvent::try_from(ServiceMessage::new("unknownThing", Vec::new()))
        .expect_err("unknown method");

    assert!(matches!(err, ProtocolError::UnknownMethod(ref method) if method == "unknownThing"));
    assert_eq!(err.method(), "unknownThing");
}

#[test]
fn empty_payload_is_reported_as_missing() {
    let err = ServiceEvent::try_from(ServiceMessage::new(ON_STATE, Vec::new()))
        .expect_err("missing payload");

    assert!(matches!(err, ProtocolError::MissingPayload { method: ON_STATE }));
}

#[test]
fn non_object_state_is_malformed() {
    let err = ServiceEvent::try_from(ServiceMessage::new(ON_STATE, vec![json!("nope")]))
        .expect_err("malformed payload");

    assert!(matches!(err, ProtocolError::MalformedPayload { method: ON_STATE, .. }));
}

#[test]
fn status_exposes_opened_scripts_and_logs() {
    let status: ServiceStatus = serde_json::from_value(json!({
        "name": "py4j",
        "openedScripts": {
            "a.py": {"file": "a.py", "code": "print(1)"},
            "dir/b.py": {"file": "dir/b.py", "code": ""}
        },
        "logs": ["first", "second"]
    }))
    .expect("status");

    assert_eq!(status.name(), Some("py4j"));
    let opened = status.opened_scripts().expect("parse").expect("present");
    assert_eq!(
        opened.scripts,
        vec![Script::new("a.py", "print(1)"), Script::new("dir/b.py", "")]
    );
    assert!(opened.rejected.is_empty());
    assert_eq!(
        status.logs(),
        Some(vec!["first".to_string(), "second".to_string()])
    );
}

#[test]
fn null_code_decodes_as_empty_buffer() {
    let script: Script =
        serde_json::from_value(json!({"file": "Servo.py", "code": null})).expect("script");
    assert_eq!(script, Script::new("Servo.py", ""));
}

#[test]
fn unreadable_opened_script_does_not_hide_the_rest() {
    let status: ServiceStatus = serde_json::from_value(json!({
        "openedScripts": {
            "a.py": {"file": "a.py", "code": "x = 1"},
            "broken.py": {"code": 42},
            "Servo.py": {"file": "Servo.py", "code": null}
        }
    }))
    .expect("status");

    let opened = status.opened_scripts().expect("parse").expect("present");
    assert_eq!(
        opened.scripts,
        vec![Script::new("Servo.py", ""), Script::new("a.py", "x = 1")]
    );
    assert_eq!(opened.rejected.len(), 1);
    assert_eq!(opened.rejected[0].0, ScriptPath::from("broken.py"));
}

#[test]
fn opened_scripts_must_be_a_map() {
    let status: ServiceStatus =
        serde_json::from_value(json!({"openedScripts": ["a.py"]})).expect("status");
    assert!(status.opened_scripts().is_err());
}

#[test]
fn decodes_clients_from_id_map() {
    let event = ServiceEvent::try_from(inbound(json!({
        "method": "onClients",
        "data": [{"c1": {"id": "c1"}, "c2": {"id": "c2"}}]
    })))
    .expect("decode");

    assert_eq!(event, ServiceEvent::Clients(vec!["c1".into(), "c2".into()]));
}

#[test]
fn decodes_clients_from_id_list() {
    let event = ServiceEvent::try_from(ServiceMessage::new(ON_CLIENTS, vec![json!(["c1"])]))
        .expect("decode");
    assert_eq!(event, ServiceEvent::Clients(vec!["c1".into()]));

    let err = ServiceEvent::try_from(ServiceMessage::new(ON_CLIENTS, vec![json!(7)]))
        .expect_err("malformed payload");
    assert!(matches!(err, ProtocolError::MalformedPayload { method: ON_CLIENTS, .. }));
}

#[test]
fn status_without_opened_scripts_reports_none() {
    let status = ServiceStatus::default();
    assert!(status.opened_scripts().expect("parse").is_none());
    assert!(status.logs().is_none());
}

#[test]
fn commands_encode_positional_arguments() {
    let msg = ServiceCommand::SaveScript {
        file: ScriptPath::from("a.py"),
        code: "x = 1".to_string(),
    }
    .into_message();

    assert_eq!(msg.method, "saveScript");
    assert_eq!(msg.data, vec![json!("a.py"), json!("x = 1")]);
    assert!(msg.msg_id.is_some());

    let clear = ServiceCommand::Clear.into_message();
    assert_eq!(clear.method, "clear");
    assert!(clear.data.is_empty());
}

#[test]
fn outbound_wire_form_uses_camel_case_id() {
    let msg = ServiceCommand::GetScriptList.into_message();
    let wire = serde_json::to_value(&msg).expect("encode");

    assert_eq!(wire["method"], "getScriptList");
    assert!(wire.get("msgId").is_some());
    assert_eq!(wire["data"], json!([]));
}

#[test]
fn file_name_handles_both_separators() {
    assert_eq!(ScriptPath::from("dir/sub/a.py").file_name(), "a.py");
    assert_eq!(ScriptPath::from("dir\\b.py").file_name(), "b.py");
    assert_eq!(ScriptPath::from("c.py").file_name(), "c.py");
}

#[test]
fn startup_subscriptions_end_with_event_sink() {
    let topics: Vec<_> = Subscription::STARTUP.iter().map(Subscription::topic).collect();
    assert_eq!(
        topics,
        vec![
            Some("publishStdOut"),
            Some("getClients"),
            Some("getScriptList"),
            None
        ]
    );
}
