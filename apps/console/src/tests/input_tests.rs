use super::*;

#[test]
fn blank_lines_are_skipped() {
    assert!(parse_line("   ").expect("parse").is_none());
    assert!(parse_line("\r\n").expect("parse").is_none());
}

#[test]
fn json_lines_are_inbound_messages() {
    let input = parse_line(r#"{"method":"onStdOut","data":["hi"]}"#)
        .expect("parse")
        .expect("input");

    let ConsoleInput::Inbound(msg) = input else {
        panic!("expected inbound message");
    };
    assert_eq!(msg.method, "onStdOut");
    assert_eq!(msg.data, vec![serde_json::json!("hi")]);
}

#[test]
fn broken_json_is_an_error() {
    assert!(matches!(
        parse_line("{not json"),
        Err(InputError::InvalidMessage(_))
    ));
}

#[test]
fn commands_with_paths_keep_spaces() {
    assert_eq!(
        parse_line("open my scripts/a.py").expect("parse"),
        Some(ConsoleInput::Open(ScriptPath::from("my scripts/a.py")))
    );
}

#[test]
fn open_without_path_is_rejected() {
    assert!(matches!(
        parse_line("open"),
        Err(InputError::MissingArgument("open"))
    ));
}

#[test]
fn add_without_name_reaches_controller() {
    assert_eq!(
        parse_line("add").expect("parse"),
        Some(ConsoleInput::Add(String::new()))
    );
}

#[test]
fn edit_unescapes_newlines_and_tabs() {
    assert_eq!(
        parse_line(r"edit for i in range(3):\n\tprint(i)\\").expect("parse"),
        Some(ConsoleInput::Edit("for i in range(3):\n\tprint(i)\\".to_string()))
    );
}

#[test]
fn close_defaults_to_active_script() {
    assert_eq!(parse_line("close").expect("parse"), Some(ConsoleInput::Close(None)));
    assert_eq!(
        parse_line("close a.py").expect("parse"),
        Some(ConsoleInput::Close(Some(ScriptPath::from("a.py"))))
    );
}

#[test]
fn unknown_command_is_reported() {
    assert!(matches!(
        parse_line("frobnicate now"),
        Err(InputError::UnknownCommand(ref name)) if name == "frobnicate"
    ));
}
