#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let raw = jsonvariant::Value::from(vec![text]);
    let reparsed = jsonvariant::parse(&raw.to_json(false)).expect("Escaped text is valid JSON");
    assert_eq!(reparsed, raw);
    if let Ok(value) = jsonvariant::parse(text) {
        let compact = value.to_json(false);
        let reparsed = jsonvariant::parse(&compact).expect("Serialized output is valid JSON");
        assert_eq!(reparsed.to_json(false), compact);
        let pretty = jsonvariant::parse(&value.to_json(true)).expect("Pretty output is valid JSON");
        assert_eq!(pretty, reparsed);
    }
});
