use crate::models::NewStudent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Please fill out the {0} field")]
pub struct MissingField(pub &'static str);

/// Field values of the add-student form, as last entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default, rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub email: String,
}

impl AddStudentForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Every field is `required` in the form; empty values never reach the API.
    pub fn to_payload(&self) -> Result<NewStudent, MissingField> {
        let fields = [
            ("name", &self.name),
            ("roll number", &self.roll_number),
            ("class", &self.class_name),
            ("email", &self.email),
        ];
        if let Some((label, _)) = fields.into_iter().find(|(_, value)| value.is_empty()) {
            return Err(MissingField(label));
        }

        Ok(NewStudent {
            name: self.name.clone(),
            roll_number: self.roll_number.clone(),
            class_name: self.class_name.clone(),
            email: self.email.clone(),
        })
    }
}
