//! the two persisted entity shapes;
//! contacts reference their category by id only, the category itself is
//! resolved by query (see `ContactDetail`)

use chrono::{DateTime, Utc};

/// representing a row from the Categories table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: i64,
    pub name: String,
}

/// representing a row from the Contacts table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub contact_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub phone_number: String,
    pub category_id: i64,
    /// stamped once on insert, never written again
    pub date_created: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// a contact joined w/ its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetail {
    pub contact: Contact,
    pub category: Category,
}

/// the fields of a contact a user may set;
/// everything an insert needs besides the timestamp, everything an update
/// is allowed to touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub phone_number: String,
    pub category_id: i64,
}

impl From<&Contact> for ContactFields {
    fn from(contact: &Contact) -> Self {
        ContactFields {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            nickname: contact.nickname.clone(),
            phone_number: contact.phone_number.clone(),
            category_id: contact.category_id,
        }
    }
}
