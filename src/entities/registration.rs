//! Account registration form

use crate::core::error::FieldValidationError;
use serde::{Deserialize, Serialize};

pub const GENDERS: [&str; 3] = ["male", "female", "other"];

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Supplier,
}

/// Sign-up form as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl Registration {
    /// Every problem with the form, in the order they are checked
    pub fn errors(&self) -> Vec<FieldValidationError> {
        let mut errors = Vec::new();

        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phoneNumber", &self.phone_number),
            ("gender", &self.gender),
            ("password", &self.password),
            ("confirmPassword", &self.confirm_password),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            errors.push(FieldValidationError::new(*field, "Please fill in all fields"));
        }

        if self.password != self.confirm_password {
            errors.push(FieldValidationError::new(
                "confirmPassword",
                "Passwords do not match",
            ));
        }

        if !self.password.is_empty() && self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldValidationError::new(
                "password",
                "Password must be at least 6 characters long",
            ));
        }

        if !self.phone_number.is_empty()
            && (self.phone_number.len() != 10
                || !self.phone_number.bytes().all(|b| b.is_ascii_digit()))
        {
            errors.push(FieldValidationError::new(
                "phoneNumber",
                "Please enter a valid 10-digit phone number",
            ));
        }

        if !self.gender.is_empty() && !GENDERS.contains(&self.gender.as_str()) {
            errors.push(FieldValidationError::new(
                "gender",
                "Please select a valid gender",
            ));
        }

        errors
    }

    /// The first problem, which is what the form shows
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        match self.errors().into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
