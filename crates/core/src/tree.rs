//! Tree record shape and input validation.
//!
//! Client input arrives as a raw JSON object. [`validate_new_tree`] and
//! [`validate_tree_patch`] check it against the static [`TREE_FIELDS`]
//! table of client-writable attributes and either produce typed input or
//! the full list of offending fields. Keys in [`SERVER_FIELDS`] are never
//! taken from the client. This module has **zero database dependencies**.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::Date;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Field table
// ---------------------------------------------------------------------------

/// How a field's JSON value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string.
    Text,
    /// Any JSON number, stored as `f64`.
    Number,
    /// JSON integer only.
    Integer,
    /// JSON string in exactly `YYYY-MM-DD` form.
    Date,
}

/// Definition of a single client-writable tree attribute.
#[derive(Debug, Clone, Copy)]
pub struct TreeFieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Must be present on create, and may never be null or blank.
    pub required: bool,
}

const fn field(name: &'static str, kind: FieldKind, required: bool) -> TreeFieldDef {
    TreeFieldDef {
        name,
        kind,
        required,
    }
}

/// Client-writable attributes, in column order.
pub const TREE_FIELDS: &[TreeFieldDef] = &[
    field("species", FieldKind::Text, false),
    field("name", FieldKind::Text, true),
    field("description", FieldKind::Text, false),
    field("purchase_cost", FieldKind::Number, false),
    field("purchase_date", FieldKind::Date, false),
    field("planted_date", FieldKind::Date, false),
    field("age", FieldKind::Integer, false),
];

/// Attributes assigned by the server. Ignored on create, rejected on patch.
pub const SERVER_FIELDS: &[&str] = &["id", "created_at", "owner_id"];

/// Look up a client-writable field definition by its JSON key.
pub fn field_def(name: &str) -> Option<&'static TreeFieldDef> {
    TREE_FIELDS.iter().find(|f| f.name == name)
}

// ---------------------------------------------------------------------------
// Validated input types
// ---------------------------------------------------------------------------

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validated input for creating a tree. Server-assigned fields are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTree {
    pub species: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub purchase_cost: Option<f64>,
    pub purchase_date: Option<Date>,
    pub planted_date: Option<Date>,
    pub age: Option<i64>,
}

/// Validated partial update.
///
/// The outer `Option` is "field present in the patch"; the inner one is
/// the new value, where `None` clears the column. `name` can never be
/// cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreePatch {
    pub species: Option<Option<String>>,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub purchase_cost: Option<Option<f64>>,
    pub purchase_date: Option<Option<Date>>,
    pub planted_date: Option<Option<Date>>,
    pub age: Option<Option<i64>>,
}

impl TreePatch {
    /// True when the patch touches no column.
    pub fn is_empty(&self) -> bool {
        self.species.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.purchase_cost.is_none()
            && self.purchase_date.is_none()
            && self.planted_date.is_none()
            && self.age.is_none()
    }
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    Integer(i64),
    Date(Date),
}

impl FieldValue {
    fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn into_number(self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(n),
            _ => None,
        }
    }

    fn into_integer(self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(n),
            _ => None,
        }
    }

    fn into_date(self) -> Option<Date> {
        match self {
            FieldValue::Date(d) => Some(d),
            _ => None,
        }
    }
}

fn coerce(def: &TreeFieldDef, value: &Value) -> Result<FieldValue, String> {
    if value.is_null() {
        return if def.required {
            Err("must not be null".to_string())
        } else {
            Ok(FieldValue::Null)
        };
    }
    match def.kind {
        FieldKind::Text => {
            let s = value.as_str().ok_or_else(|| "must be a string".to_string())?;
            if def.required && s.trim().is_empty() {
                return Err("must not be empty".to_string());
            }
            Ok(FieldValue::Text(s.to_string()))
        }
        FieldKind::Number => value
            .as_f64()
            .map(FieldValue::Number)
            .ok_or_else(|| "must be a number".to_string()),
        FieldKind::Integer => value
            .as_i64()
            .map(FieldValue::Integer)
            .ok_or_else(|| "must be an integer".to_string()),
        FieldKind::Date => {
            let s = value
                .as_str()
                .ok_or_else(|| "must be a date string (YYYY-MM-DD)".to_string())?;
            parse_date(s)
                .map(FieldValue::Date)
                .ok_or_else(|| format!("'{s}' is not a valid date (YYYY-MM-DD)"))
        }
    }
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono alone accepts unpadded fields, a leading sign and leading
/// whitespace, so the parsed date must format back to the exact input.
pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse_from_str(s, DATE_FORMAT)
        .ok()
        .filter(|d| d.format(DATE_FORMAT).to_string() == s)
}

/// Whether a server-assigned key in the input is skipped or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadOnlyPolicy {
    Ignore,
    Reject,
}

type Values = BTreeMap<&'static str, FieldValue>;

/// Coerce every key of `input`, collecting errors for unknown keys,
/// read-only keys (under [`ReadOnlyPolicy::Reject`]) and bad values.
fn coerce_object(
    input: &Map<String, Value>,
    read_only: ReadOnlyPolicy,
    errors: &mut Vec<FieldError>,
) -> Values {
    let mut values = Values::new();

    for (key, value) in input {
        if SERVER_FIELDS.contains(&key.as_str()) {
            if read_only == ReadOnlyPolicy::Reject {
                errors.push(FieldError::new(
                    key.as_str(),
                    "is assigned by the server and cannot be modified",
                ));
            }
            continue;
        }

        let Some(def) = field_def(key) else {
            errors.push(FieldError::new(key.as_str(), "unknown field"));
            continue;
        };

        match coerce(def, value) {
            Ok(v) => {
                values.insert(def.name, v);
            }
            Err(message) => errors.push(FieldError::new(key.as_str(), message)),
        }
    }

    values
}

fn finish<T>(value: Option<T>, mut errors: Vec<FieldError>) -> Result<T, Vec<FieldError>> {
    match value {
        Some(v) if errors.is_empty() => Ok(v),
        _ => {
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            Err(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// Public validators
// ---------------------------------------------------------------------------

/// Validate a create request body.
///
/// Required fields (`name`) must be present. Unknown keys are
/// rejected. Server-assigned keys (`id`, `owner_id`, `created_at`) are
/// ignored. On failure every offending field is reported, sorted by name.
pub fn validate_new_tree(input: &Map<String, Value>) -> Result<NewTree, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut values = coerce_object(input, ReadOnlyPolicy::Ignore, &mut errors);

    for def in TREE_FIELDS.iter().filter(|f| f.required) {
        if !input.contains_key(def.name) {
            errors.push(FieldError::new(def.name, "is required"));
        }
    }

    let name = values.remove("name").and_then(FieldValue::into_text);

    let mut take = |field: &str| values.remove(field);
    let tree = name.map(|name| NewTree {
        species: take("species").and_then(FieldValue::into_text),
        name,
        description: take("description").and_then(FieldValue::into_text),
        purchase_cost: take("purchase_cost").and_then(FieldValue::into_number),
        purchase_date: take("purchase_date").and_then(FieldValue::into_date),
        planted_date: take("planted_date").and_then(FieldValue::into_date),
        age: take("age").and_then(FieldValue::into_integer),
    });

    finish(tree, errors)
}

/// Validate a partial update body.
///
/// Every key must name a client-writable field; unknown and
/// server-assigned keys are rejected. `null` clears an optional field.
/// The whole patch fails if any key fails.
pub fn validate_tree_patch(input: &Map<String, Value>) -> Result<TreePatch, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut values = coerce_object(input, ReadOnlyPolicy::Reject, &mut errors);

    let name = values.remove("name").and_then(FieldValue::into_text);

    let mut take = |field: &str| values.remove(field);
    let patch = TreePatch {
        species: take("species").map(FieldValue::into_text),
        name,
        description: take("description").map(FieldValue::into_text),
        purchase_cost: take("purchase_cost").map(FieldValue::into_number),
        purchase_date: take("purchase_date").map(FieldValue::into_date),
        planted_date: take("planted_date").map(FieldValue::into_date),
        age: take("age").map(FieldValue::into_integer),
    };

    finish(Some(patch), errors)
}
