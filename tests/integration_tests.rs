use serde::{Deserialize, Serialize};
use tabletext::fs::{load, load_as, persist};
use tabletext::{
    from_str, from_str_value, from_value, table, to_string, to_string_array,
    to_string_table, to_string_with_options, Error, Key, Layout, Number, Options, Table, Value,
};
use tempfile::tempdir;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Audio {
    volume: f64,
    muted: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Settings {
    name: String,
    width: u32,
    height: u32,
    audio: Audio,
    recent: Vec<String>,
    theme: Option<String>,
}

fn sample_settings() -> Value {
    table!({
        "name": "main",
        "width": 1280,
        "height": 720,
        "audio": { "volume": 0.75, "muted": false },
        "recent": ["a.txt", "b.txt"],
        "theme": nil
    })
}

#[test]
fn test_table_layout_exact_output() {
    let value = table!({
        "b": 2,
        "a": "x",
        1: true,
        "inner": { "k": 1.5 }
    });
    let text = to_string_table("t", value.as_mapping().unwrap()).unwrap();
    assert_eq!(
        text,
        "t = {\n\
         \x20   [ 1 ] = true,\n\
         \x20   [ \"a\" ] = \"x\",\n\
         \x20   [ \"b\" ] = 2,\n\
         \x20   [ \"inner\" ] = {\n\
         \x20       [ \"k\" ] = 1.5,\n\
         \x20   },\n\
         }\n\
         return t\n"
    );
}

#[test]
fn test_table_layout_roundtrip_preserves_values() {
    let value = table!({
        "string": "with \"quotes\" and \\ and\nnewline",
        "unicode": "grüße ✓",
        "int": (-42),
        "big": 9007199254740993_i64,
        "float": 0.1,
        "whole_float": 3.0,
        "flag": true,
        7: { "deep": { "deeper": "yes" } }
    });
    let text = to_string_table("doc", value.as_mapping().unwrap()).unwrap();
    let loaded = from_str_value(&text).unwrap();
    assert_eq!(loaded, value);
    assert_eq!(
        loaded.get("whole_float"),
        Some(&Value::Number(Number::Float(3.0)))
    );
}

#[test]
fn test_sequences_reload_as_integer_keyed_mappings() {
    let value = table!({ "list": ["x", "y"] });
    let text = to_string(&value).unwrap();
    assert!(text.contains("[ \"list\" ] = {\n        [ 1 ] = \"x\",\n        [ 2 ] = \"y\",\n    },"));

    let loaded = from_str_value(&text).unwrap();
    let list = loaded.get("list").and_then(Value::as_mapping).unwrap();
    assert_eq!(
        list.to_sequence(),
        Some(vec![Value::from("x"), Value::from("y")])
    );
}

#[test]
fn test_typed_roundtrip_through_serde() {
    let text = to_string(&sample_settings()).unwrap();
    let settings: Settings = from_str(&text).unwrap();
    assert_eq!(
        settings,
        Settings {
            name: "main".to_string(),
            width: 1280,
            height: 720,
            audio: Audio {
                volume: 0.75,
                muted: false
            },
            recent: vec!["a.txt".to_string(), "b.txt".to_string()],
            theme: None,
        }
    );
}

#[test]
fn test_array_layout_output() {
    let rows = vec![
        table!({ "id": 2, "name": "Bob" }),
        table!({ "first name": "Ada", "n": 1 }),
        table!({}),
        Value::from(3.5),
        Value::from(true),
    ];
    let text = to_string_array(&rows).unwrap();
    assert_eq!(
        text,
        "return {\n\
         \x20   { id = 2, name = \"Bob\" },\n\
         \x20   { [ \"first name\" ] = \"Ada\", n = 1 },\n\
         \x20   {},\n\
         \x20   \"3.5\",\n\
         \x20   \"true\",\n\
         }\n"
    );
}

#[test]
fn test_array_layout_reloads() {
    let rows = vec![
        table!({ "id": 1, "name": "Ada" }),
        table!({ "id": 2, "name": "Bob" }),
    ];
    let text = to_string_array(&rows).unwrap();
    let loaded = from_str_value(&text).unwrap();
    assert_eq!(loaded, Value::Sequence(rows));
}

#[test]
fn test_array_layout_rejects_mapping() {
    let result = to_string_with_options(&sample_settings(), Options::array());
    assert!(matches!(result, Err(Error::Type(_))));
}

#[test]
fn test_non_finite_floats_are_rejected() {
    let mut table = Table::new();
    table.insert("bad", Value::from(f64::NAN));
    assert!(matches!(
        to_string_table("t", &table),
        Err(Error::InvalidArgument(_))
    ));

    table.insert("bad", Value::from(f64::INFINITY));
    assert!(matches!(
        to_string_table("t", &table),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_unsupported_values_are_skipped() {
    let mut table = Table::new();
    table.insert("callback", Value::Unsupported("function".to_string()));
    table.insert("kept", Value::from(1));
    let text = to_string_table("t", &table).unwrap();
    assert!(!text.contains("callback"));
    assert_eq!(
        from_str_value(&text).unwrap(),
        table!({ "kept": 1 })
    );
}

#[test]
fn test_invalid_table_name() {
    let table = Table::new();
    assert!(matches!(
        to_string_table("not a name", &table),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        to_string_table("return", &table),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_empty_table_roundtrip() {
    let text = to_string_table("empty", &Table::new()).unwrap();
    assert_eq!(text, "empty = {\n}\nreturn empty\n");
    assert_eq!(from_str_value(&text).unwrap(), Value::Mapping(Table::new()));
}

#[test]
fn test_loader_accepts_hand_written_files() {
    let text = r#"
        -- window settings
        local defaults = { width = 640, height = 480; }
        config = {
            title = 'Editor',
            size = defaults,
            [10] = "ten",
            "first",
            ratio = -0x10,
        }
        return config
    "#;
    let value = from_str_value(text).unwrap();
    assert_eq!(value.get("title"), Some(&Value::from("Editor")));
    assert_eq!(value.get("ratio"), Some(&Value::from(-16)));
    assert_eq!(value.get(10), Some(&Value::from("ten")));
    assert_eq!(value.get(1), Some(&Value::from("first")));
    assert_eq!(
        value.get("size").and_then(|s| s.get("width")),
        Some(&Value::from(640))
    );
}

#[test]
fn test_loader_reports_position() {
    let err = from_str_value("x = {\n    a = 1,\n    b = print(\"hi\"),\n}\n").unwrap_err();
    match err {
        Error::Parse { line, .. } => assert_eq!(line, 3),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_loader_rejects_code() {
    assert!(from_str_value("os.execute('rm -rf /')").is_err());
    assert!(from_str_value("return 1 + 2").is_err());
    assert!(from_str_value("").is_err());
}

#[test]
fn test_loader_depth_limit() {
    let deep = format!("return {}{}", "{".repeat(300), "}".repeat(300));
    assert!(matches!(from_str_value(&deep), Err(Error::Parse { .. })));
}

#[test]
fn test_persist_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.lua");
    let settings = table!({ "volume": 7, "name": "main", "audio": { "muted": true } });

    persist(&settings, &path, &Options::new().with_name("settings")).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("settings = {\n"));
    assert!(text.ends_with("return settings\n"));

    assert_eq!(load(&path).unwrap(), settings);
}

#[test]
fn test_persist_overwrites() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.lua");
    persist(&table!({ "a": 1, "b": 2 }), &path, &Options::default()).unwrap();
    persist(&table!({ "c": 3 }), &path, &Options::default()).unwrap();
    assert_eq!(load(&path).unwrap(), table!({ "c": 3 }));
}

#[test]
fn test_failed_persist_keeps_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.lua");
    persist(&table!({ "a": 1 }), &path, &Options::default()).unwrap();

    let bad = table!({ "x": (f64::NAN) });
    assert!(persist(&bad, &path, &Options::default()).is_err());
    assert_eq!(load(&path).unwrap(), table!({ "a": 1 }));
}

#[test]
fn test_persist_rejects_tables_too_deep_to_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deep.lua");

    let mut value = Value::Mapping(Table::new());
    for _ in 0..300 {
        let mut outer = Table::new();
        outer.insert("child", value);
        value = Value::Mapping(outer);
    }

    let err = persist(&value, &path, &Options::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(!path.exists());
}

#[test]
fn test_persist_array_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rows.lua");
    let rows = table!([{ "id": 1 }, { "id": 2 }]);

    persist(&rows, &path, &Options::new().with_layout(Layout::Array)).unwrap();
    assert_eq!(load(&path).unwrap(), rows);
}

#[test]
fn test_persist_to_missing_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("data.lua");
    let err = persist(&table!({ "a": 1 }), &path, &Options::default()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        load(dir.path().join("nope.lua")),
        Err(Error::Io { .. })
    ));
}

#[test]
fn test_load_as_struct() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.lua");
    persist(&sample_settings(), &path, &Options::default()).unwrap();

    let settings: Settings = load_as(&path).unwrap();
    assert_eq!(settings.audio.volume, 0.75);
    assert_eq!(settings.recent.len(), 2);
}

#[test]
fn test_load_as_shape_mismatch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wrong.lua");
    persist(&table!({ "name": 5 }), &path, &Options::default()).unwrap();
    assert!(load_as::<Settings, _>(&path).is_err());
}

#[derive(Deserialize, Debug, PartialEq)]
enum Mode {
    Fast,
    Limited { max: u32 },
}

#[test]
fn test_enums_from_tables() {
    assert_eq!(from_value::<Mode>(Value::from("Fast")).unwrap(), Mode::Fast);
    assert_eq!(
        from_str::<Mode>("return { Limited = { max = 3 } }").unwrap(),
        Mode::Limited { max: 3 }
    );
}

#[test]
fn test_serde_json_interop() {
    let json = r#"{"name":"main","size":[640,480],"enabled":true,"ratio":0.5}"#;
    let value: Value = serde_json::from_str(json).unwrap();
    assert_eq!(value.get("name"), Some(&Value::from("main")));
    assert_eq!(
        value.get("size"),
        Some(&Value::Sequence(vec![Value::from(640), Value::from(480)]))
    );

    let text = to_string(&value).unwrap();
    let reloaded = from_str_value(&text).unwrap();
    assert_eq!(reloaded.get("ratio"), Some(&Value::from(0.5)));

    let back = serde_json::to_value(&table!({ "b": 1, "a": [true] })).unwrap();
    assert_eq!(back, serde_json::json!({ "a": [true], "b": 1 }));
}

#[test]
fn test_key_types() {
    let mut table = Table::new();
    table.insert(Key::Integer(1), Value::from("int"));
    table.insert(Key::from("1"), Value::from("str"));
    assert_eq!(table.len(), 2);

    let text = to_string_table("t", &table).unwrap();
    let loaded = from_str_value(&text).unwrap();
    assert_eq!(loaded.get(1), Some(&Value::from("int")));
    assert_eq!(loaded.get("1"), Some(&Value::from("str")));
}
