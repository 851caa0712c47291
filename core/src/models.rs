use serde::{Deserialize, Serialize};

/// The sole persisted resource of the todo service.
///
/// `text` and `due_date` are nullable in storage (the permissive schema
/// variant); `completed` always has a value and defaults to `false` on
/// creation. The JSON representation uses `dueDate`, matching the wire
/// format clients expect.
///
/// # Examples
///
/// ```rust
/// use todo_core::models::TodoItem;
///
/// let item = TodoItem {
///     id: 7,
///     text: Some("buy milk".to_string()),
///     due_date: Some("2024-01-01".to_string()),
///     completed: false,
/// };
///
/// let json = serde_json::to_value(&item).unwrap();
/// assert_eq!(json["dueDate"], "2024-01-01");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    /// Primary key, supplied by the caller in the POST path
    pub id: i64,
    /// Free-form item text
    pub text: Option<String>,
    /// Free-form due date string
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    /// Completion flag
    pub completed: bool,
}

/// The whitelisted subset of a request body.
///
/// Deserialization is the field whitelist: only `id`, `text`, `dueDate` and
/// `completed` are recognized, every other key in the incoming JSON is
/// silently dropped, and an explicit `null` on a known key deserializes to
/// `None` and is treated as "field not supplied" rather than "set to null".
///
/// An all-`None` patch is the distinct "no valid fields supplied" condition
/// reported by [`TodoPatch::is_empty`]; it is a validation failure, not a
/// no-op success.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TodoPatch {
    pub id: Option<i64>,
    pub text: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

/// The four recognized field names, as they appear on the wire.
pub const WHITELISTED_FIELDS: [&str; 4] = ["id", "text", "dueDate", "completed"];

impl TodoPatch {
    /// True when no whitelisted field was supplied.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.text.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }

    /// Names of the whitelisted fields present in this patch, in the fixed
    /// whitelist order. Used for logging and tests; SQL construction iterates
    /// the fields directly.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.id.is_some() {
            fields.push("id");
        }
        if self.text.is_some() {
            fields.push("text");
        }
        if self.due_date.is_some() {
            fields.push("dueDate");
        }
        if self.completed.is_some() {
            fields.push("completed");
        }
        fields
    }
}
