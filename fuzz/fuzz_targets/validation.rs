#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&[u8], &[u8])| {
    let (schema, instance) = data;
    let (Ok(schema), Ok(instance)) = (std::str::from_utf8(schema), std::str::from_utf8(instance))
    else {
        return;
    };
    let (Ok(schema), Ok(instance)) = (jsonvariant::parse(schema), jsonvariant::parse(instance))
    else {
        return;
    };
    if let Ok(validator) = jsonvariant::validator_for(&schema) {
        let _ = validator.validate(&instance);
        let _ = validator.trace(&instance, &mut |_| {});
    }
});
