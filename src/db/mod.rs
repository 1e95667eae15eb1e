//! handles db specific functionality
//! (initialization, integrity checking, contact and category queries)
//! opening connections per request ousted to submodule store

pub mod helpers;
pub mod queries;
pub mod store;

pub use store::Store;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Category, Contact, ContactDetail, ContactFields};
use helpers::*;
use queries::*;

/// initialize a newly created db; tables, index and seed rows
/// are written in one transaction
pub fn init(db: &mut Connection) -> Result<()> {
    let tx = db.transaction()?;

    tx.execute(SQL_CREATE_CAT, ())?;
    tx.execute(SQL_CREATE_CON, ())?;
    tx.execute(SQL_CREATE_CON_IDX, ())?;

    for (id, name) in SEED_CATEGORIES {
        tx.execute(
            &format!("INSERT INTO {} (CategoryId, Name) VALUES (?1, ?2)",
                     SQL_TABLEN_CAT),
            params![id, name],
        )?;
    }

    for seed in SEED_CONTACTS.iter() {
        tx.execute(
            &format!("INSERT INTO {}
                     (ContactId, FirstName, LastName, Nickname,
                      PhoneNumber, CategoryId, DateCreated)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                     SQL_TABLEN_CON),
            params![
                seed.id,
                seed.first_name,
                seed.last_name,
                seed.nickname,
                seed.phone_number,
                seed.category_id,
                midnight_utc(seed.date_created),
            ],
        )?;
    }

    tx.commit()?;
    info!("initialized db w/ seeded categories and contacts");

    Ok(())
}

/// true if the db holds no tables at all (new or never initialized)
pub fn is_empty(db: &Connection) -> Result<bool> {
    let tables: i64 = db.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
        [],
        |row| row.get(0),
    )?;

    Ok(tables == 0)
}

/// check existing db for integrity, conforming to expected layout
pub fn check(db: &Connection) -> Result<()> {
    // compare creation schema versus the one from sqlite_master

    let mut stmt = db.prepare(
        "SELECT sql FROM sqlite_master WHERE type='table' AND name=?1",
    )?;

    for (table, create) in [
        (SQL_TABLEN_CAT, SQL_CREATE_CAT),
        (SQL_TABLEN_CON, SQL_CREATE_CON),
    ] {
        let schema: Option<String> = stmt
            .query_row(params![table], |row| row.get(0))
            .optional()?;

        match schema.map(clean) {
            Some(schema) if schema == clean(create.to_string()) => (),
            _ => return Err(Error::Integrity(table.to_string())),
        }
    }

    debug!("db tables passed integrity check");
    Ok(())
}

/// all categories ordered by name
pub fn get_categories(db: &Connection) -> Result<Vec<Category>> {
    let mut stmt = db.prepare(&format!(
        "SELECT CategoryId, Name FROM {} ORDER BY Name COLLATE NOCASE ASC",
        SQL_TABLEN_CAT
    ))?;

    let categories = stmt
        .query_map([], row_to_category)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(categories)
}

/// every contact joined w/ its category;
/// ordered by last name, then first name
pub fn get_contacts(db: &Connection) -> Result<Vec<ContactDetail>> {
    let mut stmt = db.prepare(&format!(
        "SELECT {}, cat.Name FROM {} c
         INNER JOIN {} cat ON cat.CategoryId = c.CategoryId
         ORDER BY c.LastName COLLATE NOCASE ASC,
                  c.FirstName COLLATE NOCASE ASC,
                  c.ContactId ASC",
        CONTACT_COLUMNS, SQL_TABLEN_CON, SQL_TABLEN_CAT
    ))?;

    let contacts = stmt
        .query_map([], row_to_detail)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(contacts)
}

pub fn find_contact(db: &Connection, id: i64) -> Result<Option<Contact>> {
    let contact = db
        .query_row(
            &format!("SELECT {} FROM {} c WHERE c.ContactId = ?1",
                     CONTACT_COLUMNS, SQL_TABLEN_CON),
            params![id],
            row_to_contact,
        )
        .optional()?;

    Ok(contact)
}

/// single contact w/ its category populated
pub fn find_contact_detail(
    db: &Connection,
    id: i64,
) -> Result<Option<ContactDetail>> {
    let detail = db
        .query_row(
            &format!(
                "SELECT {}, cat.Name FROM {} c
                 INNER JOIN {} cat ON cat.CategoryId = c.CategoryId
                 WHERE c.ContactId = ?1",
                CONTACT_COLUMNS, SQL_TABLEN_CON, SQL_TABLEN_CAT
            ),
            params![id],
            row_to_detail,
        )
        .optional()?;

    Ok(detail)
}

/// insert a new contact; returns the id assigned by the db
pub fn insert_contact(
    db: &Connection,
    fields: &ContactFields,
    date_created: DateTime<Utc>,
) -> Result<i64> {
    db.execute(
        &format!("INSERT INTO {}
                 (FirstName, LastName, Nickname,
                  PhoneNumber, CategoryId, DateCreated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                 SQL_TABLEN_CON),
        params![
            fields.first_name,
            fields.last_name,
            fields.nickname,
            fields.phone_number,
            fields.category_id,
            date_created,
        ],
    )?;

    Ok(db.last_insert_rowid())
}

/// overwrite the user editable fields of an existing contact;
/// DateCreated and ContactId are never written;
/// returns false if there's no such contact
pub fn update_contact(
    db: &mut Connection,
    id: i64,
    fields: &ContactFields,
) -> Result<bool> {
    let tx = db.transaction()?;

    let exists = tx
        .query_row(
            &format!("SELECT 1 FROM {} WHERE ContactId = ?1", SQL_TABLEN_CON),
            params![id],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if !exists {
        return Ok(false);
    }

    tx.execute(
        &format!("UPDATE {} SET
                 FirstName = ?1, LastName = ?2, Nickname = ?3,
                 PhoneNumber = ?4, CategoryId = ?5
                 WHERE ContactId = ?6",
                 SQL_TABLEN_CON),
        params![
            fields.first_name,
            fields.last_name,
            fields.nickname,
            fields.phone_number,
            fields.category_id,
            id,
        ],
    )?;

    tx.commit()?;
    Ok(true)
}

/// remove a contact; removing a missing one is not an error,
/// the return value only tells whether a row went away
pub fn delete_contact(db: &Connection, id: i64) -> Result<bool> {
    let removed = db.execute(
        &format!("DELETE FROM {} WHERE ContactId = ?1", SQL_TABLEN_CON),
        params![id],
    )?;

    Ok(removed > 0)
}

/// remove a category and, through the foreign key, all of its contacts
pub fn delete_category(db: &Connection, id: i64) -> Result<bool> {
    let removed = db.execute(
        &format!("DELETE FROM {} WHERE CategoryId = ?1", SQL_TABLEN_CAT),
        params![id],
    )?;

    Ok(removed > 0)
}
