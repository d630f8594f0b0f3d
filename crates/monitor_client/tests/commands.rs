use monitor_client::CrawlCommand;
use pretty_assertions::assert_eq;

#[test]
fn start_command_carries_urls_and_depth_without_id() {
    let command = CrawlCommand::Start {
        urls: vec!["http://a".into(), "http://b".into()],
        depth: 3,
    };

    let encoded = command.encode().expect("encode");
    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value["Cmd"], "start");
    assert_eq!(value["URLs"], serde_json::json!(["http://a", "http://b"]));
    assert_eq!(value["Depth"], 3);
    assert!(value.get("ID").is_none());
}

#[test]
fn targeted_commands_carry_id_and_sentinel_depth() {
    for (command, name) in [
        (CrawlCommand::Stop { id: 104 }, "stop"),
        (CrawlCommand::Pause { id: 104 }, "pause"),
        (CrawlCommand::Resume { id: 104 }, "resume"),
    ] {
        let encoded = command.encode().expect("encode");
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["Cmd"], name);
        assert_eq!(value["ID"], 104);
        assert_eq!(value["Depth"], -1);
        assert_eq!(value["URLs"], serde_json::json!([]));
    }
}
