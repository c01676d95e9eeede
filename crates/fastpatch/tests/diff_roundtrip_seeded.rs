//! Seeded differential tests for the diff generator: random document
//! pairs must round-trip through `compare` + `apply_patch`, for both the
//! plain and the invertible form. Failures print the seed so a case can
//! be pinned.

use fastpatch::{apply_patch, are_equals, compare, deep_clone, ApplyOptions, Op};
use fastpatch_json_pointer::get as pointer_get;
use fastpatch_util::Fuzzer;
use serde_json::{Map, Value};

const KEY_POOL: &[&str] = &["a", "b", "c", "d", "a/b", "x~y", "", "k 1", "nested"];
const STRING_CHARS: &str = "abcxyz~/ 01";

fn random_json(fuzzer: &mut Fuzzer, depth: usize) -> Value {
    let kind = if depth == 0 {
        fuzzer.random_int(0, 3)
    } else {
        fuzzer.random_int(0, 5)
    };
    match kind {
        0 => Value::Null,
        1 => Value::Bool(fuzzer.random_bool(0.5)),
        2 => Value::from(fuzzer.random_int(-1000, 1000)),
        3 => {
            let len = fuzzer.random_int(0, 8) as usize;
            Value::String(fuzzer.random_string(len, STRING_CHARS))
        }
        4 => {
            let len = fuzzer.random_int(0, 4) as usize;
            Value::Array(fuzzer.repeat(len, |f| random_json(f, depth - 1)))
        }
        _ => {
            let len = fuzzer.random_int(0, 4) as usize;
            let mut map = Map::new();
            for _ in 0..len {
                let key = fuzzer.pick(KEY_POOL).to_string();
                map.insert(key, random_json(fuzzer, depth - 1));
            }
            Value::Object(map)
        }
    }
}

/// Produce a partially overlapping variant of `value`, so diffs exercise
/// the recursion rather than whole-tree replacement.
fn mutate(fuzzer: &mut Fuzzer, value: &Value, depth: usize) -> Value {
    if fuzzer.random_bool(0.25) {
        return random_json(fuzzer, depth.min(2));
    }
    match value {
        Value::Array(arr) => {
            let mut out: Vec<Value> = arr
                .iter()
                .map(|v| mutate(fuzzer, v, depth.saturating_sub(1)))
                .collect();
            if !out.is_empty() && fuzzer.random_bool(0.3) {
                let idx = fuzzer.random_int(0, out.len() as i64 - 1) as usize;
                out.remove(idx);
            }
            if fuzzer.random_bool(0.3) {
                out.push(random_json(fuzzer, 1));
            }
            Value::Array(out)
        }
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, val) in map {
                if fuzzer.random_bool(0.2) {
                    continue;
                }
                out.insert(key.clone(), mutate(fuzzer, val, depth.saturating_sub(1)));
            }
            if fuzzer.random_bool(0.3) {
                let key = fuzzer.pick(KEY_POOL).to_string();
                out.insert(key, random_json(fuzzer, 1));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

fn replay(doc: &Value, ops: &[Op]) -> Value {
    apply_patch(deep_clone(doc), ops, &ApplyOptions::default())
        .expect("generated patch must replay")
        .doc
}

#[test]
fn seeded_roundtrip_of_mutated_documents() {
    for seed in 0..200u64 {
        let mut fuzzer = Fuzzer::new(seed);
        let src = random_json(&mut fuzzer, 3);
        let dst = mutate(&mut fuzzer, &src, 3);

        let ops = compare(&src, &dst, false);
        let replayed = replay(&src, &ops);
        assert!(
            are_equals(&replayed, &dst),
            "seed {seed}: replay diverged\nsrc: {src}\ndst: {dst}\nops: {ops:?}\ngot: {replayed}"
        );
    }
}

#[test]
fn seeded_roundtrip_of_independent_documents() {
    for seed in 0..200u64 {
        let mut fuzzer = Fuzzer::new(seed.wrapping_add(10_000));
        let src = random_json(&mut fuzzer, 3);
        let dst = random_json(&mut fuzzer, 3);

        let ops = compare(&src, &dst, false);
        let replayed = replay(&src, &ops);
        assert!(
            are_equals(&replayed, &dst),
            "seed {seed}: replay diverged\nsrc: {src}\ndst: {dst}\nops: {ops:?}\ngot: {replayed}"
        );
    }
}

#[test]
fn seeded_invertible_roundtrip_and_test_steps_hold() {
    for seed in 0..200u64 {
        let mut fuzzer = Fuzzer::new(seed.wrapping_add(20_000));
        let src = random_json(&mut fuzzer, 3);
        let dst = mutate(&mut fuzzer, &src, 3);

        let ops = compare(&src, &dst, true);

        // Every emitted test step holds against the pristine source.
        for op in &ops {
            if let Op::Test { path, value } = op {
                let actual = pointer_get(&src, path);
                assert!(
                    actual.is_some_and(|actual| are_equals(actual, value)),
                    "seed {seed}: test step does not hold against source at {path:?}"
                );
            }
        }

        let replayed = replay(&src, &ops);
        assert!(
            are_equals(&replayed, &dst),
            "seed {seed}: invertible replay diverged\nsrc: {src}\ndst: {dst}"
        );
    }
}

#[test]
fn seeded_self_compare_is_empty() {
    for seed in 0..200u64 {
        let mut fuzzer = Fuzzer::new(seed.wrapping_add(30_000));
        let doc = random_json(&mut fuzzer, 3);
        assert!(
            compare(&doc, &doc, false).is_empty(),
            "seed {seed}: self-compare emitted operations for {doc}"
        );
        assert!(
            compare(&doc, &doc, true).is_empty(),
            "seed {seed}: invertible self-compare emitted operations for {doc}"
        );
    }
}
