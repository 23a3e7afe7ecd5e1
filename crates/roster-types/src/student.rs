use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned identifier. The remote API hands out numbers or strings
/// depending on the endpoint, so ids are normalised to text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl StudentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: Option<u32>,
    pub address: String,
    pub contact: String,
}

/// Whatever subset of a record the remote API sent back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StudentPatch {
    pub id: Option<StudentId>,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub address: Option<String>,
    pub contact: Option<String>,
}

/// A validated draft, ready to be sent to the create or update endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub age: u32,
    pub address: String,
    pub contact: String,
}

impl Student {
    pub const NOT_AVAILABLE: &'static str = "N/A";

    /// Builds the record to keep locally after a create or update.
    ///
    /// Fields present in `response` win. Anything it omits falls back to
    /// what was sent, and the id falls back to `idHint`.
    pub fn merged(idHint: Option<&StudentId>, sent: &NewStudent, response: Option<StudentPatch>) -> Self {
        let patch = response.unwrap_or_default();
        Self {
            id: patch
                .id
                .filter(|id| !id.is_empty())
                .or_else(|| idHint.cloned())
                .unwrap_or_default(),
            name: patch.name.unwrap_or_else(|| sent.name.clone()),
            age: patch.age.or(Some(sent.age)),
            address: patch.address.unwrap_or_else(|| sent.address.clone()),
            contact: patch.contact.unwrap_or_else(|| sent.contact.clone()),
        }
    }

    pub fn name_label(&self) -> String {
        or_not_available(&self.name)
    }

    pub fn age_label(&self) -> String {
        self.age
            .map(|age| age.to_string())
            .unwrap_or_else(|| Self::NOT_AVAILABLE.to_string())
    }

    pub fn address_label(&self) -> String {
        or_not_available(&self.address)
    }

    pub fn contact_label(&self) -> String {
        or_not_available(&self.contact)
    }
}

impl From<StudentPatch> for Student {
    fn from(patch: StudentPatch) -> Self {
        Self {
            id: patch.id.unwrap_or_default(),
            name: patch.name.unwrap_or_default(),
            age: patch.age,
            address: patch.address.unwrap_or_default(),
            contact: patch.contact.unwrap_or_default(),
        }
    }
}

fn or_not_available(value: &str) -> String {
    if value.trim().is_empty() {
        Student::NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Age,
    Address,
    Contact,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DraftField::Name => "Name",
            DraftField::Age => "Age",
            DraftField::Address => "Address",
            DraftField::Contact => "Contact",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(DraftField),
    #[error("age must be a whole number, got \"{0}\"")]
    InvalidAge(String),
    #[error("age must be at least 1, got {0}")]
    AgeOutOfRange(i64),
}

/// In-progress form state for a student being created or edited.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    pub age: String,
    pub address: String,
    pub contact: String,
}

impl StudentDraft {
    pub fn validate(&self) -> Result<NewStudent, DraftError> {
        let name = required(&self.name, DraftField::Name)?;
        let ageText = required(&self.age, DraftField::Age)?;
        let address = required(&self.address, DraftField::Address)?;
        let contact = required(&self.contact, DraftField::Contact)?;

        let age = ageText
            .parse::<i64>()
            .map_err(|_| DraftError::InvalidAge(ageText.clone()))?;
        if age < 1 {
            return Err(DraftError::AgeOutOfRange(age));
        }
        let age = u32::try_from(age).map_err(|_| DraftError::InvalidAge(ageText))?;

        Ok(NewStudent {
            name,
            age,
            address,
            contact,
        })
    }
}

impl From<&Student> for StudentDraft {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            age: student.age.map(|a| a.to_string()).unwrap_or_default(),
            address: student.address.clone(),
            contact: student.contact.clone(),
        }
    }
}

fn required(value: &str, field: DraftField) -> Result<String, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DraftError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn apply_created(list: &mut Vec<Student>, record: Student) {
    list.push(record);
}

/// Replaces the entry with the same id, appending when it is not in the list.
/// A record without an id never replaces anything.
pub fn apply_updated(list: &mut Vec<Student>, record: Student) {
    let existing = if record.id.is_empty() {
        None
    } else {
        list.iter_mut().find(|s| s.id == record.id)
    };
    match existing {
        Some(existing) => *existing = record,
        None => list.push(record),
    }
}

/// Removes the entry with `id`. An empty id matches nothing.
pub fn apply_deleted(list: &mut Vec<Student>, id: &StudentId) {
    if id.is_empty() {
        return;
    }
    list.retain(|s| &s.id != id);
}
