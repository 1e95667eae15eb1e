//! field validation of submitted contact forms;
//! turns the raw form payload into `ContactFields` or a list of
//! (field, message) pairs

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::models::{Category, Contact, ContactFields};

pub const MAX_LEN: usize = 50;

/// category a contact lands in when the form leaves it out
pub const DEFAULT_CATEGORY_ID: i64 = 1;

/// a contact form as submitted; everything is text until validated
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContactPayload {
    pub contact_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub phone_number: String,
    pub category_id: Option<String>,
}

impl ContactPayload {
    /// the payload a blank create form starts out with
    pub fn blank() -> Self {
        ContactPayload {
            category_id: Some(DEFAULT_CATEGORY_ID.to_string()),
            ..Default::default()
        }
    }

    /// the identifier carried in the form body, if it parses
    pub fn id(&self) -> Option<i64> {
        self.contact_id.as_deref()?.trim().parse().ok()
    }
}

impl From<&Contact> for ContactPayload {
    fn from(contact: &Contact) -> Self {
        ContactPayload {
            contact_id: Some(contact.contact_id.to_string()),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            nickname: contact.nickname.clone(),
            phone_number: contact.phone_number.clone(),
            category_id: Some(contact.category_id.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// form field name, as in `ContactPayload`'s wire names
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError { field, message: message.into() }
    }
}

/// validate `payload` against the known `categories`
pub fn validate(
    payload: &ContactPayload,
    categories: &[Category],
) -> Result<ContactFields, Vec<FieldError>> {
    let mut errors = Vec::new();

    required(&mut errors, "FirstName", "First Name", "First name required.",
             &payload.first_name);
    required(&mut errors, "LastName", "Last Name", "Last name required.",
             &payload.last_name);

    let nickname = payload
        .nickname
        .as_deref()
        .filter(|n| !n.trim().is_empty());
    if let Some(nickname) = nickname {
        max_len(&mut errors, "Nickname", "Nickname", nickname);
    }

    if payload.phone_number.trim().is_empty() {
        errors.push(FieldError::new("PhoneNumber", "Phone number required."));
    } else if !is_phone_number(&payload.phone_number) {
        errors.push(FieldError::new("PhoneNumber", "Enter a valid phone number."));
    }

    let category_id = match payload.category_id.as_deref().map(str::trim) {
        None | Some("") => Some(DEFAULT_CATEGORY_ID),
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::new("CategoryId", "Category required."));
                None
            }
        },
    };
    if let Some(id) = category_id {
        if !categories.iter().any(|c| c.category_id == id) {
            errors.push(FieldError::new("CategoryId", "Select a valid category."));
        }
    }

    match category_id {
        Some(category_id) if errors.is_empty() => Ok(ContactFields {
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            nickname: nickname.map(str::to_string),
            phone_number: payload.phone_number.clone(),
            category_id,
        }),
        _ => Err(errors),
    }
}

fn required(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    display: &str,
    message: &str,
    value: &str,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    } else {
        max_len(errors, field, display, value);
    }
}

fn max_len(errors: &mut Vec<FieldError>, field: &'static str, display: &str, value: &str) {
    if value.chars().count() > MAX_LEN {
        errors.push(FieldError::new(
            field,
            format!("The field {} must be a string with a maximum length of {}.",
                    display, MAX_LEN),
        ));
    }
}

/// phone check the way the framework's phone attribute does it:
/// every `+` is dropped and trailing blanks are ignored, a trailing
/// `x`/`ext`/`ext.` extension followed by digits is cut off, what's left
/// needs a digit and may only hold digits, blanks and `-.()`
pub fn is_phone_number(value: &str) -> bool {
    static EXTENSION: OnceLock<Regex> = OnceLock::new();
    static NUMBER: OnceLock<Regex> = OnceLock::new();

    let extension = EXTENSION.get_or_init(|| {
        Regex::new(r"(?i)(ext\.|ext|x)\s*\d+$").expect("valid regex")
    });
    let number = NUMBER.get_or_init(|| {
        Regex::new(r"^[\d\s().-]*\d[\d\s().-]*$").expect("valid regex")
    });

    let stripped = value.replace('+', "");
    let stripped = stripped.trim_end();
    let stripped = match extension.find(stripped) {
        Some(m) => &stripped[..m.start()],
        None => stripped,
    };

    number.is_match(stripped)
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn categories() -> Vec<Category>
    {
        ["Family", "Friend", "Work"]
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                category_id: i as i64 + 1,
                name: name.to_string(),
            })
            .collect()
    }

    fn payload() -> ContactPayload
    {
        ContactPayload {
            contact_id: None,
            first_name: "Dana".to_string(),
            last_name: "Lee".to_string(),
            nickname: Some("".to_string()),
            phone_number: "555-000-1111".to_string(),
            category_id: Some("2".to_string()),
        }
    }

    fn fields_of(errors: &[FieldError]) -> Vec<&'static str>
    {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn valid_payload_passes()
    {
        let fields = validate(&payload(), &categories()).unwrap();

        assert_eq!(fields.first_name, "Dana");
        assert_eq!(fields.last_name, "Lee");
        assert_eq!(fields.nickname, None);
        assert_eq!(fields.phone_number, "555-000-1111");
        assert_eq!(fields.category_id, 2);
    }

    #[test]
    fn empty_first_name_rejected()
    {
        let mut p = payload();
        p.first_name = "   ".to_string();

        let errors = validate(&p, &categories()).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("FirstName", "First name required.")]);
    }

    #[test]
    fn every_required_field_reported()
    {
        let p = ContactPayload::default();
        let errors = validate(&p, &categories()).unwrap_err();

        assert_eq!(fields_of(&errors), vec!["FirstName", "LastName", "PhoneNumber"]);
    }

    #[test]
    fn long_names_rejected()
    {
        let mut p = payload();
        p.last_name = "x".repeat(MAX_LEN + 1);
        p.nickname = Some("y".repeat(MAX_LEN + 1));

        let errors = validate(&p, &categories()).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["LastName", "Nickname"]);
        assert_eq!(
            errors[0].message,
            "The field Last Name must be a string with a maximum length of 50."
        );

        // exactly at the limit is fine, counted in characters
        p.last_name = "é".repeat(MAX_LEN);
        p.nickname = None;
        assert!(validate(&p, &categories()).is_ok());
    }

    #[test]
    fn phone_formats()
    {
        for ok in ["123-456-7890", "770-423-6789 ", "(404) 555.0101",
                   "+1 404 555 0101", "5550001111", "555-0101 ext. 12",
                   "555-0101x7", "555 EXT 9", "12+34", "1 +555 0101",
                   "555-0101+"]
        {
            assert!(is_phone_number(ok), "{} should pass", ok);
        }

        for bad in ["phone", "555-CALL-NOW", "---", "+", "", "555 0101 ext",
                    "x12", "555/0101", "555 x 12 x 34"]
        {
            assert!(!is_phone_number(bad), "{} should fail", bad);
        }
    }

    #[test]
    fn malformed_phone_rejected()
    {
        let mut p = payload();
        p.phone_number = "call me".to_string();

        let errors = validate(&p, &categories()).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("PhoneNumber", "Enter a valid phone number.")]);
    }

    #[test]
    fn missing_category_defaults_to_family()
    {
        let mut p = payload();
        p.category_id = None;
        assert_eq!(validate(&p, &categories()).unwrap().category_id, 1);

        p.category_id = Some(" ".to_string());
        assert_eq!(validate(&p, &categories()).unwrap().category_id, 1);
    }

    #[test]
    fn bad_category_rejected()
    {
        let mut p = payload();

        p.category_id = Some("abc".to_string());
        let errors = validate(&p, &categories()).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("CategoryId", "Category required.")]);

        p.category_id = Some("9".to_string());
        let errors = validate(&p, &categories()).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("CategoryId", "Select a valid category.")]);
    }

    #[test]
    fn payload_id_parses()
    {
        let mut p = payload();
        assert_eq!(p.id(), None);

        p.contact_id = Some("7".to_string());
        assert_eq!(p.id(), Some(7));

        p.contact_id = Some("seven".to_string());
        assert_eq!(p.id(), None);
    }
}
