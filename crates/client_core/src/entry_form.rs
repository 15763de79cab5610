//! Entry form: four fields, four independent rules, append on success.

use chrono::Utc;
use shared::domain::{Entry, Gender};
use storage::KeyValueStore;
use thiserror::Error;

use crate::collection::{append_local_entry, next_local_id, CollectionError};

pub const PHONE_MAX_LEN: usize = 10;
pub const SUCCESS_MESSAGE: &str = "Student added successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Gender,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Gender,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name cannot be empty.")]
    EmptyName,
    #[error("Email must contain \"@\".")]
    MissingAt,
    #[error("Phone must be exactly 10 digits.")]
    InvalidPhone,
    #[error("Please select a gender.")]
    MissingGender,
}

impl ValidationError {
    pub fn field(self) -> FormField {
        match self {
            ValidationError::EmptyName => FormField::Name,
            ValidationError::MissingAt => FormField::Email,
            ValidationError::InvalidPhone => FormField::Phone,
            ValidationError::MissingGender => FormField::Gender,
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !email.contains('@') {
        return Err(ValidationError::MissingAt);
    }
    Ok(())
}

/// Exactly ten ASCII digits, nothing else (surrounding whitespace included).
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == PHONE_MAX_LEN && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_gender(gender: Option<Gender>) -> Result<Gender, ValidationError> {
    gender.ok_or(ValidationError::MissingGender)
}

/// At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    name: Option<ValidationError>,
    email: Option<ValidationError>,
    phone: Option<ValidationError>,
    gender: Option<ValidationError>,
}

impl FieldErrors {
    fn slot(&mut self, field: FormField) -> &mut Option<ValidationError> {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Gender => &mut self.gender,
        }
    }

    pub fn get(&self, field: FormField) -> Option<ValidationError> {
        match field {
            FormField::Name => self.name,
            FormField::Email => self.email,
            FormField::Phone => self.phone,
            FormField::Gender => self.gender,
        }
    }

    pub fn record(&mut self, err: ValidationError) {
        *self.slot(err.field()) = Some(err);
    }

    pub fn clear(&mut self, field: FormField) {
        *self.slot(field) = None;
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.into_iter().all(|field| self.get(field).is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = ValidationError> + '_ {
        FormField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(Entry),
    Rejected(FieldErrors),
}

#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    name: String,
    email: String,
    phone: String,
    gender: Option<Gender>,
    errors: FieldErrors,
    success: Option<&'static str>,
    last_added: Option<Entry>,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Gender => self.gender.map_or("", Gender::label),
        }
    }

    /// Mutable buffer for a text field; `None` for gender, which is a choice.
    /// Callers editing through this must call [`EntryForm::clear_error`].
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Phone => Some(&mut self.phone),
            FormField::Gender => None,
        }
    }

    /// Editing a field drops that field's error and leaves the others alone.
    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match self.text_mut(field) {
            Some(buffer) => *buffer = value,
            None => self.gender = value.parse().ok(),
        }
        self.errors.clear(field);
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.gender = gender;
        self.errors.clear(FormField::Gender);
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn clear_error(&mut self, field: FormField) {
        self.errors.clear(field);
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn success_message(&self) -> Option<&'static str> {
        self.success
    }

    pub fn last_added(&self) -> Option<&Entry> {
        self.last_added.as_ref()
    }

    /// Runs every rule; one failing rule never hides another.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        let results = [
            validate_name(&self.name),
            validate_email(&self.email),
            validate_phone(&self.phone),
            validate_gender(self.gender).map(|_| ()),
        ];
        for err in results.into_iter().filter_map(Result::err) {
            errors.record(err);
        }
        errors
    }

    pub async fn submit<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<SubmitOutcome, CollectionError> {
        self.success = None;
        self.last_added = None;

        let errors = self.validate();
        let gender = match validate_gender(self.gender) {
            Ok(gender) if errors.is_empty() => gender,
            _ => {
                tracing::debug!(failures = errors.iter().count(), "entry form rejected");
                self.errors = errors.clone();
                return Ok(SubmitOutcome::Rejected(errors));
            }
        };

        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        let phone = self.phone.trim().to_string();
        let now_millis = Utc::now().timestamp_millis();
        let entry = append_local_entry(store, move |existing| Entry {
            id: next_local_id(existing, now_millis),
            name,
            email,
            phone,
            gender: Some(gender),
        })
        .await?;

        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.gender = None;
        self.errors = FieldErrors::default();
        self.success = Some(SUCCESS_MESSAGE);
        self.last_added = Some(entry.clone());
        Ok(SubmitOutcome::Saved(entry))
    }
}

#[cfg(test)]
#[path = "tests/entry_form_tests.rs"]
mod tests;
