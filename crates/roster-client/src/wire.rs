//! Conversion between the remote API's JSON and the canonical record types.
//!
//! The remote service is not consistent about field names (`student_name`
//! on the list endpoint, `name` elsewhere) or id types, so every incoming
//! object is read key by key instead of through a fixed serde shape.

use roster_types::{NewStudent, StudentId, StudentPatch};
use serde::Serialize;
use serde_json::{Map, Value};

const ID_KEYS: &[&str] = &["id", "_id", "student_id", "studentId"];
const NAME_KEYS: &[&str] = &["student_name", "name"];
const AGE_KEYS: &[&str] = &["student_age", "age"];
const ADDRESS_KEYS: &[&str] = &["student_address", "address"];
const CONTACT_KEYS: &[&str] = &["student_contact", "contact"];

/// Outgoing create/update body.
#[derive(Serialize, Debug, PartialEq)]
pub struct StudentBody<'a> {
    pub student_name: &'a str,
    pub student_age: u32,
    pub student_address: &'a str,
    pub student_contact: &'a str,
}

impl<'a> From<&'a NewStudent> for StudentBody<'a> {
    fn from(student: &'a NewStudent) -> Self {
        Self {
            student_name: &student.name,
            student_age: student.age,
            student_address: &student.address,
            student_contact: &student.contact,
        }
    }
}

/// Reads one record. Returns `None` when `value` is not an object or has
/// none of the known keys.
pub fn patch_from_value(value: &Value) -> Option<StudentPatch> {
    let obj = value.as_object()?;

    let patch = StudentPatch {
        id: first(obj, ID_KEYS).and_then(id_from_value),
        name: first(obj, NAME_KEYS).and_then(text_from_value),
        age: first(obj, AGE_KEYS).and_then(age_from_value),
        address: first(obj, ADDRESS_KEYS).and_then(text_from_value),
        contact: first(obj, CONTACT_KEYS).and_then(text_from_value),
    };

    if patch == StudentPatch::default() {
        None
    } else {
        Some(patch)
    }
}

/// Reads a create/update response, which may be the record itself or the
/// record wrapped in `data` or `student`.
pub fn patch_from_response(value: &Value) -> Option<StudentPatch> {
    patch_from_value(value).or_else(|| {
        let obj = value.as_object()?;
        ["data", "student"]
            .iter()
            .filter_map(|key| obj.get(*key))
            .find_map(patch_from_value)
    })
}

/// `None` when the list response is not a JSON array.
pub fn patches_from_list(value: &Value) -> Option<Vec<StudentPatch>> {
    let items = value.as_array()?;
    Some(items.iter().filter_map(patch_from_value).collect())
}

pub fn token_from_login(value: &Value) -> Option<String> {
    let direct = ["token", "access_token", "accessToken"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str));
    let nested = || value.get("data")?.get("token")?.as_str();

    direct
        .or_else(nested)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// The server's own explanation, from `message` or `error`.
pub fn error_message(value: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn first<'v>(obj: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| !v.is_null())
}

fn id_from_value(value: &Value) -> Option<StudentId> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(StudentId(s.trim().to_string())),
        Value::Number(n) => Some(StudentId(n.to_string())),
        _ => None,
    }
}

fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn age_from_value(value: &Value) -> Option<u32> {
    let age = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(age).ok().filter(|a| *a >= 1)
}
