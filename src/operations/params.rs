//! Conversion of typed operation parameters into query arguments.

use serde::Serialize;
use serde_json::Value;

use crate::clients::{InvalidQueryError, QueryArgs};

/// Serializes a params struct into query arguments.
///
/// Field names are used as argument names, so params structs rename their
/// fields to the service's `PascalCase`. `None` fields are skipped, numbers
/// and booleans are rendered with `to_string`, and sequences are joined with
/// commas the way ECS expects multi-valued arguments such as `ResponseGroup`
/// or `ItemId`.
pub(crate) fn to_query_args<T: Serialize>(params: &T) -> Result<QueryArgs, InvalidQueryError> {
    let value = serde_json::to_value(params).map_err(|e| InvalidQueryError::Params {
        message: e.to_string(),
    })?;

    let Value::Object(map) = value else {
        return Err(InvalidQueryError::Params {
            message: "parameters must serialize to a map".to_string(),
        });
    };

    let mut args = QueryArgs::new();
    for (key, val) in map {
        match val {
            Value::Null => {}
            Value::String(s) => {
                args.insert(key, s);
            }
            Value::Number(n) => {
                args.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                args.insert(key, if b { "True" } else { "False" }.to_string());
            }
            Value::Array(values) => {
                let values: Vec<String> = values
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect();
                if !values.is_empty() {
                    args.insert(key, values.join(","));
                }
            }
            Value::Object(_) => {
                args.insert(key, val.to_string());
            }
        }
    }

    Ok(args)
}
