use crate::config::FormatterConfig;
use crate::exception::exception_info_value;
use crate::value::TagValue;
use serde_json::{Map, Value};

/// Upper bound on dot-notation nesting. Segments past this depth stay
/// joined in the final key instead of nesting further.
const MAX_PATH_DEPTH: usize = 32;

/// Format the tag mapping into its contribution to the output document.
///
/// Empty values are stripped recursively, an `error` tag holding a
/// captured error becomes a structured error object, and dot-separated
/// keys expand into nested objects. Processing follows tag insertion
/// order; on conflicts the last write wins.
pub fn format_tags<'a, I>(tags: I, config: &FormatterConfig) -> Map<String, Value>
where
    I: IntoIterator<Item = &'a (String, TagValue)>,
{
    let mut out = Map::new();
    for (name, value) in tags {
        // Captured errors are not plain data; they bypass empty-value
        // stripping and expand into the structured error object.
        if name == "error" {
            if let TagValue::Error(err) = value {
                out.insert(name.clone(), exception_info_value(err, config));
                continue;
            }
        }

        let Some(cleaned) = remove_empty_values(value) else {
            continue;
        };

        if name.contains('.') {
            insert_nested(&mut out, name, cleaned);
        } else {
            merge_into(&mut out, name.clone(), cleaned);
        }
    }
    out
}

/// Recursively drop empty strings, empty mappings and sequences, and
/// nulls. Booleans (including `false`) and zero numbers are data and
/// are always kept.
fn remove_empty_values(value: &TagValue) -> Option<Value> {
    match value {
        TagValue::Null => None,
        TagValue::Str(s) if s.is_empty() => None,
        TagValue::Str(s) => Some(Value::String(s.clone())),
        TagValue::Bool(b) => Some(Value::Bool(*b)),
        TagValue::Int(n) => Some(Value::from(*n)),
        TagValue::Float(n) => Some(Value::from(*n)),
        TagValue::Seq(items) => {
            let cleaned: Vec<Value> = items.iter().filter_map(remove_empty_values).collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(Value::Array(cleaned))
            }
        }
        TagValue::Map(pairs) => {
            let mut cleaned = Map::new();
            for (key, val) in pairs {
                if let Some(val) = remove_empty_values(val) {
                    cleaned.insert(key.clone(), val);
                }
            }
            if cleaned.is_empty() {
                None
            } else {
                Some(Value::Object(cleaned))
            }
        }
        TagValue::Error(err) => Some(Value::String(err.to_string())),
    }
}

/// Expand a dot-separated key, creating or reusing object levels along
/// the path. A non-object value sitting at an intermediate segment is
/// overwritten with a fresh object.
fn insert_nested(out: &mut Map<String, Value>, path: &str, value: Value) {
    let segments: Vec<&str> = path.splitn(MAX_PATH_DEPTH, '.').collect();
    let mut current = out;
    for segment in &segments[..segments.len() - 1] {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just replaced with an object"),
        };
    }
    let leaf = segments[segments.len() - 1];
    merge_into(current, leaf.to_string(), value);
}

/// Insert `value` under `key`, deep-merging when both sides are
/// objects so literal nested tags and dot-notated tags targeting the
/// same key combine instead of clobbering each other.
fn merge_into(map: &mut Map<String, Value>, key: String, value: Value) {
    match value {
        Value::Object(incoming) => {
            if let Some(Value::Object(existing)) = map.get_mut(&key) {
                for (k, v) in incoming {
                    merge_into(existing, k, v);
                }
                return;
            }
            map.insert(key, Value::Object(incoming));
        }
        other => {
            map.insert(key, other);
        }
    }
}
