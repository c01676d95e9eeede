use serde_json::{Map, Value};

/// Creates a deep clone of any JSON value.
///
/// Every nested object and array is rebuilt, so the result shares no
/// storage with the input. JavaScript hosts map `undefined` to `null`
/// when cloning through serialisation; parsed JSON cannot contain
/// `undefined`, so no such case exists for `serde_json::Value`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use fastpatch_util::json_clone::deep_clone;
///
/// let original = json!({"foo": [1, 2, 3]});
/// let cloned = deep_clone(&original);
///
/// assert_eq!(original, cloned);
/// ```
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(deep_clone).collect()),
        Value::Object(obj) => {
            let mut new_obj = Map::new();
            for (key, val) in obj {
                new_obj.insert(key.clone(), deep_clone(val));
            }
            Value::Object(new_obj)
        }
    }
}
