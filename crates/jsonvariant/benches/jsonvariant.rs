use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jsonvariant::{json, Value};

fn team(players: usize) -> String {
    let players: Vec<Value> = (0..players)
        .map(|idx| {
            json!({
                "name": format!("Player {idx}"),
                "averageScoring": 10.5,
                "positions": ["forward", "guard"]
            })
        })
        .collect();
    json!({
        "id": 7,
        "coach": "Samuel Motivator",
        "address": {"city": "Poprad", "country": "Slovakia"},
        "players": players,
        "identificators": [1, 2, 3, 4]
    })
    .to_json(true)
}

fn schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer", "minimum": 0},
            "coach": {"type": "string", "minLength": 8, "pattern": "^[A-Z][a-z]+ [A-Z][a-z]+$"},
            "address": {"$ref": "#/definitions/address"},
            "players": {"type": "array", "items": {"$ref": "#/definitions/player"}},
            "identificators": {"type": "array", "items": {"type": "number"}, "uniqueItems": true}
        },
        "required": ["id", "coach", "players"],
        "definitions": {
            "address": {
                "type": "object",
                "properties": {"city": {"type": "string"}, "country": {"type": "string"}},
                "required": ["city", "country"]
            },
            "player": {
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "averageScoring": {"type": "number"},
                    "positions": {"type": "array", "items": {"type": "string"}, "maxItems": 3}
                },
                "required": ["name"]
            }
        }
    })
}

fn bench_parse(c: &mut Criterion) {
    for size in [10, 1000] {
        let text = team(size);
        c.bench_with_input(BenchmarkId::new("parse", size), &text, |b, text| {
            b.iter_with_large_drop(|| jsonvariant::parse(text).expect("Valid JSON"));
        });
    }
}

fn bench_serialize(c: &mut Criterion) {
    let value = jsonvariant::parse(&team(1000)).expect("Valid JSON");
    for pretty in [false, true] {
        c.bench_with_input(
            BenchmarkId::new("to_json", if pretty { "pretty" } else { "compact" }),
            &value,
            |b, value| b.iter_with_large_drop(|| value.to_json(pretty)),
        );
    }
}

fn bench_validate(c: &mut Criterion) {
    let validator = jsonvariant::validator_for(&schema()).expect("Valid schema");
    for size in [10, 1000] {
        let instance = jsonvariant::parse(&team(size)).expect("Valid JSON");
        c.bench_with_input(BenchmarkId::new("is_valid", size), &instance, |b, instance| {
            b.iter(|| {
                let _ = validator.is_valid(instance);
            });
        });
    }
}

criterion_group!(benches, bench_parse, bench_serialize, bench_validate);
criterion_main!(benches);
