use serde_json::{json, Value};

/// Fixed demonstration class used by the `sample` command.
pub fn sample_students() -> Vec<Value> {
    vec![
        json!({ "name": "Alice Johnson", "grades": [85, 92, 78, 88] }),
        json!({ "name": "Bob Smith", "grades": [65, 72, 68, 71] }),
        json!({ "name": "Carol Davis", "grades": [95, 98, 92, 96] }),
        json!({ "name": "David Wilson", "grades": [45, 52, 48, 55] }),
        json!({ "name": "Eve Brown", "grades": [75, 82, 79, 85] }),
    ]
}
