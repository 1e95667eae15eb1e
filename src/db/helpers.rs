use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use rusqlite::Row;

use crate::models::{Category, Contact, ContactDetail};

// column list shared by every query returning a full contact;
// row_to_contact relies on this order
pub const CONTACT_COLUMNS : &str =
    "c.ContactId, c.FirstName, c.LastName, c.Nickname, \
     c.PhoneNumber, c.CategoryId, c.DateCreated";

// helper function to clean a sql query
pub fn clean(input : String) -> String
{
    static WS : OnceLock<Regex> = OnceLock::new();
    let s = input.replace("\n", " ").replace("\t", " ");
    let r = WS.get_or_init(|| Regex::new(r"\s{2,}").expect("valid regex"));
    r.replace_all(&s, " ").to_string()
}

// helper function to build the midnight UTC timestamp of a seed date
pub fn midnight_utc((yy, mm, dd) : (i32, u32, u32)) -> DateTime<Utc>
{
    Utc.with_ymd_and_hms(yy, mm, dd, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn row_to_category(row : &Row<'_>) -> rusqlite::Result<Category>
{
    Ok(Category {
        category_id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn row_to_contact(row : &Row<'_>) -> rusqlite::Result<Contact>
{
    Ok(Contact {
        contact_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        nickname: row.get(3)?,
        phone_number: row.get(4)?,
        category_id: row.get(5)?,
        date_created: row.get(6)?,
    })
}

// expects CONTACT_COLUMNS followed by the category's name
pub fn row_to_detail(row : &Row<'_>) -> rusqlite::Result<ContactDetail>
{
    let contact = row_to_contact(row)?;
    let category = Category {
        category_id: contact.category_id,
        name: row.get(7)?,
    };

    Ok(ContactDetail { contact, category })
}

#[cfg(test)]
mod tests
{
    use super::*;
    use chrono::Datelike;

    #[test]
    fn clean_works()
    {
        let s = "Test\tstring\nfor cleaning\t".to_string();
        assert_eq!(clean(s), "Test string for cleaning ".to_string());
    }

    #[test]
    fn midnight_utc_works()
    {
        let dt = midnight_utc((2025, 2, 11));
        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 2, 11));
        assert_eq!(dt.timestamp() % 86_400, 0);
    }
}
