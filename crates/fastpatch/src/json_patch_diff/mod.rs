//! JSON Patch diff: generate a patch that transforms one document into
//! another.
//!
//! The generated sequence replays correctly through the applier:
//! `apply_patch(compare(a, b, _), deep_clone(a))` yields a document
//! structurally equal to `b`. With `invertible` set, every mutating
//! operation is preceded by a `test` of the value it displaces, so the
//! patch both verifies its source state and can be inverted by hand.

use serde_json::Value;

use fastpatch_json_pointer::Path;
use fastpatch_util::{are_equals, deep_clone};

use crate::json_patch::types::Op;

/// Generate a JSON Patch (list of operations) that transforms `a` into `b`.
pub fn compare(a: &Value, b: &Value, invertible: bool) -> Vec<Op> {
    let mut patches = Vec::new();
    let mut path = Vec::new();
    generate(a, b, &mut path, &mut patches, invertible);
    patches
}

// ── Core recursive differ ─────────────────────────────────────────────────

fn generate(mirror: &Value, obj: &Value, path: &mut Path, patches: &mut Vec<Op>, invertible: bool) {
    match (mirror, obj) {
        (Value::Object(old), Value::Object(new)) => {
            let mut deleted = false;
            // Old keys walk in reverse insertion order. For arrays the
            // analogous reverse walk keeps earlier indices valid during
            // replay; objects mirror it so both sides behave alike.
            let old_keys: Vec<&String> = old.keys().collect();
            for key in old_keys.into_iter().rev() {
                let old_val = &old[key];
                match new.get(key) {
                    Some(new_val) => {
                        path.push(key.clone());
                        generate(old_val, new_val, path, patches, invertible);
                        path.pop();
                    }
                    None => {
                        path.push(key.clone());
                        if invertible {
                            patches.push(Op::Test {
                                path: path.clone(),
                                value: deep_clone(old_val),
                            });
                        }
                        patches.push(Op::Remove { path: path.clone() });
                        path.pop();
                        deleted = true;
                    }
                }
            }
            if !deleted && new.len() == old.len() {
                return;
            }
            for (key, new_val) in new {
                if !old.contains_key(key) {
                    path.push(key.clone());
                    patches.push(Op::Add {
                        path: path.clone(),
                        value: deep_clone(new_val),
                    });
                    path.pop();
                }
            }
        }
        (Value::Array(old), Value::Array(new)) => {
            let mut deleted = false;
            // Tail first, so emitted removals do not shift the indices of
            // operations emitted later for this array.
            for idx in (0..old.len()).rev() {
                match new.get(idx) {
                    Some(new_val) => {
                        path.push(idx.to_string());
                        generate(&old[idx], new_val, path, patches, invertible);
                        path.pop();
                    }
                    None => {
                        path.push(idx.to_string());
                        if invertible {
                            patches.push(Op::Test {
                                path: path.clone(),
                                value: deep_clone(&old[idx]),
                            });
                        }
                        patches.push(Op::Remove { path: path.clone() });
                        path.pop();
                        deleted = true;
                    }
                }
            }
            if !deleted && new.len() == old.len() {
                return;
            }
            for (idx, new_val) in new.iter().enumerate().skip(old.len()) {
                path.push(idx.to_string());
                patches.push(Op::Add {
                    path: path.clone(),
                    value: deep_clone(new_val),
                });
                path.pop();
            }
        }
        // Scalars, or a container kind mismatch: replace this node whole.
        _ => {
            if !are_equals(mirror, obj) {
                if invertible {
                    patches.push(Op::Test {
                        path: path.clone(),
                        value: deep_clone(mirror),
                    });
                }
                patches.push(Op::Replace {
                    path: path.clone(),
                    value: deep_clone(obj),
                });
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_patch::apply::apply_patch;
    use crate::json_patch::types::ApplyOptions;
    use serde_json::json;

    fn replay(doc: &Value, ops: &[Op]) -> Value {
        apply_patch(deep_clone(doc), ops, &ApplyOptions::default())
            .expect("generated patch must replay")
            .doc
    }

    #[test]
    fn identical_documents_diff_to_nothing() {
        assert!(compare(&json!({"a": 1}), &json!({"a": 1}), false).is_empty());
        assert!(compare(&json!([1, [2], {"x": 3}]), &json!([1, [2], {"x": 3}]), false).is_empty());
        assert!(compare(&json!(null), &json!(null), false).is_empty());
    }

    #[test]
    fn scalar_change_is_one_replace() {
        let ops = compare(&json!({"a": 1, "b": 2}), &json!({"a": 1, "b": 3}), false);
        assert_eq!(
            ops,
            vec![Op::Replace {
                path: vec!["b".to_string()],
                value: json!(3)
            }]
        );
    }

    #[test]
    fn added_key_is_one_add() {
        let ops = compare(&json!({"a": 1}), &json!({"a": 1, "b": 2}), false);
        assert_eq!(
            ops,
            vec![Op::Add {
                path: vec!["b".to_string()],
                value: json!(2)
            }]
        );
    }

    #[test]
    fn removed_key_is_one_remove() {
        let ops = compare(&json!({"a": 1, "b": 2}), &json!({"a": 1}), false);
        assert_eq!(
            ops,
            vec![Op::Remove {
                path: vec!["b".to_string()]
            }]
        );
    }

    #[test]
    fn array_shrink_removes_tail_first() {
        let ops = compare(&json!([1, 2, 3]), &json!([1, 3]), false);
        assert_eq!(
            ops,
            vec![
                Op::Remove {
                    path: vec!["2".to_string()]
                },
                Op::Replace {
                    path: vec!["1".to_string()],
                    value: json!(3)
                },
            ]
        );
        assert_eq!(replay(&json!([1, 2, 3]), &ops), json!([1, 3]));
    }

    #[test]
    fn array_growth_appends_in_order() {
        let src = json!([1, 2]);
        let dst = json!([9, 1, 2, 3]);
        let ops = compare(&src, &dst, false);
        assert_eq!(replay(&src, &ops), dst);
    }

    #[test]
    fn empty_array_to_full_and_back() {
        let src = json!({"a": []});
        let dst = json!({"a": [1, 2, 3]});
        let ops = compare(&src, &dst, false);
        assert_eq!(replay(&src, &ops), dst);
        let ops = compare(&dst, &src, false);
        assert_eq!(replay(&dst, &ops), src);
    }

    #[test]
    fn nested_change_uses_deep_path() {
        let ops = compare(
            &json!({"user": {"name": "Alice", "age": 30}}),
            &json!({"user": {"name": "Alice", "age": 31}}),
            false,
        );
        assert_eq!(
            ops,
            vec![Op::Replace {
                path: vec!["user".to_string(), "age".to_string()],
                value: json!(31)
            }]
        );
    }

    #[test]
    fn kind_mismatch_replaces_whole_node() {
        let src = json!({"a": {"x": 1}});
        let dst = json!({"a": [1]});
        let ops = compare(&src, &dst, false);
        assert_eq!(
            ops,
            vec![Op::Replace {
                path: vec!["a".to_string()],
                value: json!([1])
            }]
        );
        assert_eq!(replay(&src, &ops), dst);
    }

    #[test]
    fn root_kind_mismatch_replaces_root_once() {
        let src = json!({"a": 1, "b": 2});
        let dst = json!([1, 2]);
        let ops = compare(&src, &dst, false);
        assert_eq!(
            ops,
            vec![Op::Replace {
                path: vec![],
                value: json!([1, 2])
            }]
        );
        assert_eq!(replay(&src, &ops), dst);
    }

    #[test]
    fn root_scalars_diff() {
        assert!(compare(&json!(1), &json!(1), false).is_empty());
        let ops = compare(&json!(1), &json!(2), false);
        assert_eq!(
            ops,
            vec![Op::Replace {
                path: vec![],
                value: json!(2)
            }]
        );
    }

    #[test]
    fn paths_with_special_characters_replay() {
        let src = json!({"a/b": 1, "c~d": {"e/f~g": 2}});
        let dst = json!({"a/b": 9, "c~d": {"e/f~g": 3}});
        let ops = compare(&src, &dst, false);
        assert_eq!(replay(&src, &ops), dst);
    }

    #[test]
    fn invertible_prepends_tests_that_pass() {
        let src = json!({"a": 1, "b": [1, 2, 3]});
        let dst = json!({"a": 2, "b": [1, 2]});
        let ops = compare(&src, &dst, true);
        // Every mutating op is preceded by a test of the displaced value.
        assert_eq!(ops.len(), 4);
        assert!(matches!(ops[0], Op::Test { .. }));
        assert!(matches!(ops[1], Op::Remove { .. }));
        assert!(matches!(ops[2], Op::Test { .. }));
        assert!(matches!(ops[3], Op::Replace { .. }));
        // The whole sequence, tests included, replays against the source.
        assert_eq!(replay(&src, &ops), dst);
    }

    #[test]
    fn invertible_adds_have_no_test() {
        let ops = compare(&json!({}), &json!({"a": 1}), true);
        assert_eq!(
            ops,
            vec![Op::Add {
                path: vec!["a".to_string()],
                value: json!(1)
            }]
        );
    }

    #[test]
    fn mixed_document_roundtrip() {
        let src = json!({
            "name": "Alice",
            "tags": ["x", "y", "z"],
            "meta": {"version": 1, "flags": {"a": true}}
        });
        let dst = json!({
            "name": "Bob",
            "tags": ["x", "z"],
            "meta": {"version": 2, "flags": {"b": false}},
            "extra": null
        });
        for invertible in [false, true] {
            let ops = compare(&src, &dst, invertible);
            assert_eq!(replay(&src, &ops), dst, "invertible: {invertible}");
        }
    }

    #[test]
    fn diff_output_is_deterministic() {
        let src = json!({"z": 1, "a": 2});
        let dst = json!({"z": 2, "a": 2, "m": 3});
        assert_eq!(compare(&src, &dst, false), compare(&src, &dst, false));
    }
}
