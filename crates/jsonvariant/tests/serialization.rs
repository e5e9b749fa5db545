use jsonvariant::{json, parse, Map, Value};
use test_case::test_case;

#[cfg(windows)]
const NL: &str = "\r\n";
#[cfg(not(windows))]
const NL: &str = "\n";

#[test_case(json!({}))]
#[test_case(json!([1, -2, 0.25, 1e-7, 12_345_678_901_i64]))]
#[test_case(json!({"nested": {"list": [null, true, false, "x"]}, "empty": []}))]
#[test_case(json!(["tab\there", "quote\"", "unicode\\u00e9", "caf\u{e9}"]))]
#[test_case(Value::from(vec!["say \"hi\"\n", "a\nb", "back\\x", "\u{1}"]); "raw literals")]
#[test_case(json!({"key \"quoted\"": {"line\nbreak": "C:\\dir"}}); "raw keys")]
fn round_trip(value: Value) {
    assert_eq!(parse(&value.to_json(false)).expect("Valid JSON"), value);
    assert_eq!(parse(&value.to_json(true)).expect("Valid JSON"), value);
}

#[test]
fn compact() {
    let value = json!({"b": [1, 2.5], "a": "x", "c": {}});
    assert_eq!(value.to_json(false), r#"{"a":"x","b":[1,2.5],"c":{}}"#);
    assert_eq!(value.to_string(), value.to_json(false));
}

#[test]
fn pretty() {
    let value = json!({"name": "Sam", "tags": ["a", []], "meta": {}});
    let expected = [
        "{",
        "    \"meta\": {},",
        "    \"name\": \"Sam\",",
        "    \"tags\": [",
        "        \"a\",",
        "        []",
        "    ]",
        "}",
    ]
    .join(NL);
    assert_eq!(value.to_json(true), expected);
}

#[test]
fn empty_is_omitted() {
    let mut object = Map::new();
    object.insert("kept".to_string(), Value::from(1));
    object.insert("dropped".to_string(), Value::Empty);
    let value = Value::Array(vec![Value::Empty, Value::Object(object), Value::Empty]);
    assert_eq!(value.to_json(false), r#"[{"kept":1}]"#);
    assert_eq!(Value::Empty.to_json(false), "");
}

#[test]
fn raw_characters_are_escaped() {
    let value = Value::from(vec!["say \"hi\"\n", "back\\slash"]);
    assert_eq!(value.to_json(false), r#"["say \"hi\"\n","back\\slash"]"#);
}

#[test]
fn escaped_and_raw_text_stay_distinct() {
    let newline = Value::from("\n");
    let backslash_n = Value::from("\\n");
    assert_ne!(newline, backslash_n);
    assert_eq!(newline.to_json(false), r#""\n""#);
    assert_eq!(backslash_n.to_json(false), r#""\\n""#);
}

#[test]
fn numbers_compare_across_construction() {
    assert_eq!(Value::from(1), Value::from(1.0));
    assert_eq!(json!([1_u8, 2_i64]), parse("[1.0, 2e0]").expect("Valid JSON"));
}
