//! Request model binding.

use serde_json::{Map, Value};

use crate::core::Request;

/// Build the action's model from the request: POST requests yield an object
/// holding the form parameters, every other method yields no model.
///
/// Binding from query parameters is intentionally not implemented; GET
/// actions receive `None` and read the request directly.
pub fn bind_request_model(request: &Request) -> Option<Value> {
    if !request.is_post() {
        return None;
    }

    let mut object = Map::new();
    for (key, value) in request.form_all() {
        object.insert(key.clone(), Value::String(value.clone()));
    }
    Some(Value::Object(object))
}
