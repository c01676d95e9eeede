use serde_json::Value;

/// Structural equality between two JSON values.
///
/// Type-strict and total: values of different kinds are never equal, and
/// arrays and objects are never equal to each other. Arrays compare by
/// length and pairwise elements; objects compare by key set and pairwise
/// values, with key order irrelevant. Numbers and strings use exact
/// equality. Hosts whose number type can produce NaN treat NaN as equal
/// to NaN under `test`; `serde_json::Number` cannot encode NaN, so that
/// case cannot arise here.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use fastpatch_util::json_equal::are_equals;
///
/// assert!(are_equals(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
/// assert!(!are_equals(&json!([1, 2]), &json!([2, 1])));
/// ```
pub fn are_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            if arr_a.len() != arr_b.len() {
                return false;
            }
            arr_a.iter().zip(arr_b).all(|(x, y)| are_equals(x, y))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            for (key, val_a) in obj_a {
                match obj_b.get(key) {
                    Some(val_b) => {
                        if !are_equals(val_a, val_b) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        }

        // Different kinds are never equal
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equal_numbers() {
        assert!(are_equals(&json!(1), &json!(1)));
    }

    #[test]
    fn test_not_equal_numbers() {
        assert!(!are_equals(&json!(1), &json!(2)));
    }

    #[test]
    fn test_number_and_array_not_equal() {
        assert!(!are_equals(&json!(1), &json!([])));
    }

    #[test]
    fn test_zero_and_null_not_equal() {
        assert!(!are_equals(&json!(0), &json!(null)));
    }

    #[test]
    fn test_equal_strings() {
        assert!(are_equals(&json!("a"), &json!("a")));
    }

    #[test]
    fn test_empty_string_and_null_not_equal() {
        assert!(!are_equals(&json!(""), &json!(null)));
    }

    #[test]
    fn test_null_equal_null() {
        assert!(are_equals(&json!(null), &json!(null)));
    }

    #[test]
    fn test_booleans() {
        assert!(are_equals(&json!(true), &json!(true)));
        assert!(are_equals(&json!(false), &json!(false)));
        assert!(!are_equals(&json!(true), &json!(false)));
    }

    #[test]
    fn test_one_and_true_not_equal() {
        assert!(!are_equals(&json!(1), &json!(true)));
    }

    #[test]
    fn test_zero_and_false_not_equal() {
        assert!(!are_equals(&json!(0), &json!(false)));
    }

    #[test]
    fn test_empty_objects_equal() {
        assert!(are_equals(&json!({}), &json!({})));
    }

    #[test]
    fn test_equal_objects_different_key_order() {
        assert!(are_equals(
            &json!({"a": 1, "b": "2"}),
            &json!({"b": "2", "a": 1})
        ));
    }

    #[test]
    fn test_not_equal_objects_extra_property() {
        assert!(!are_equals(
            &json!({"a": 1, "b": "2"}),
            &json!({"a": 1, "b": "2", "c": []})
        ));
    }

    #[test]
    fn test_not_equal_objects_different_values() {
        assert!(!are_equals(
            &json!({"a": 1, "b": "2", "c": 3}),
            &json!({"a": 1, "b": "2", "c": 4})
        ));
    }

    #[test]
    fn test_not_equal_objects_different_properties() {
        assert!(!are_equals(
            &json!({"a": 1, "b": "2", "c": 3}),
            &json!({"a": 1, "b": "2", "d": 3})
        ));
    }

    #[test]
    fn test_equal_nested_objects() {
        assert!(are_equals(
            &json!({"a": [{"b": "c"}]}),
            &json!({"a": [{"b": "c"}]})
        ));
    }

    #[test]
    fn test_empty_object_and_array_not_equal() {
        assert!(!are_equals(&json!({}), &json!([])));
    }

    #[test]
    fn test_arrays() {
        assert!(are_equals(&json!([]), &json!([])));
        assert!(are_equals(&json!([1, 2, 3]), &json!([1, 2, 3])));
        assert!(!are_equals(&json!([1, 2, 3]), &json!([1, 2, 4])));
        assert!(!are_equals(&json!([1, 2, 3]), &json!([1, 2])));
        assert!(!are_equals(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn test_arrays_of_objects() {
        assert!(are_equals(
            &json!([{"a": "a"}, {"b": "b"}]),
            &json!([{"a": "a"}, {"b": "b"}])
        ));
        assert!(!are_equals(
            &json!([{"a": "a"}, {"b": "b"}]),
            &json!([{"a": "a"}, {"b": "c"}])
        ));
    }

    #[test]
    fn test_big_object_key_order_irrelevant() {
        let a = json!({
            "prop1": "value1",
            "prop2": "value2",
            "prop3": "value3",
            "prop4": {
                "subProp1": "sub value1",
                "subProp2": {
                    "subSubProp1": "sub sub value1",
                    "subSubProp2": [1, 2, {"prop2": 1, "prop": 2}, 4, 5]
                }
            },
            "prop5": 1000
        });
        let b = json!({
            "prop5": 1000,
            "prop3": "value3",
            "prop1": "value1",
            "prop2": "value2",
            "prop4": {
                "subProp2": {
                    "subSubProp1": "sub sub value1",
                    "subSubProp2": [1, 2, {"prop2": 1, "prop": 2}, 4, 5]
                },
                "subProp1": "sub value1"
            }
        });
        assert!(are_equals(&a, &b));
    }
}
