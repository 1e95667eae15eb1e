pub const SQL_TABLEN_CAT : &str = "Categories";
pub const SQL_CREATE_CAT : &str =
"CREATE TABLE Categories (
    CategoryId INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NOT NULL CHECK (length(Name) <= 50)
    )";

pub const SQL_TABLEN_CON : &str = "Contacts";
// CAREFUL: contacts reference the categories table BY NAME!
// deleting a category takes its contacts with it (needs foreign_keys=ON)
pub const SQL_CREATE_CON : &str =
"CREATE TABLE Contacts (
    ContactId INTEGER PRIMARY KEY AUTOINCREMENT,
    FirstName TEXT NOT NULL CHECK (length(FirstName) <= 50),
    LastName TEXT NOT NULL CHECK (length(LastName) <= 50),
    Nickname TEXT CHECK (Nickname IS NULL OR length(Nickname) <= 50),
    PhoneNumber TEXT NOT NULL,
    CategoryId INTEGER NOT NULL,
    DateCreated TEXT NOT NULL,
    FOREIGN KEY (CategoryId) REFERENCES Categories(CategoryId) ON DELETE CASCADE
    )";

pub const SQL_CREATE_CON_IDX : &str =
"CREATE INDEX IX_Contacts_CategoryId ON Contacts (CategoryId)";

/// seeded categories; (id, name)
pub const SEED_CATEGORIES : [(i64, &str); 3] = [
    (1, "Family"),
    (2, "Friend"),
    (3, "Work"),
];

/// seeded contact row;
/// date_created is a (year, month, day) at midnight UTC
pub struct SeedContact {
    pub id           : i64,
    pub first_name   : &'static str,
    pub last_name    : &'static str,
    pub nickname     : Option<&'static str>,
    pub phone_number : &'static str,
    pub category_id  : i64,
    pub date_created : (i32, u32, u32),
}

pub const SEED_CONTACTS : [SeedContact; 3] = [
    SeedContact {
        id: 1,
        first_name: "Alice",
        last_name: "Kelly",
        nickname: Some("Ally"),
        phone_number: "123-456-7890",
        category_id: 2,
        date_created: (2025, 1, 10),
    },
    SeedContact {
        id: 2,
        first_name: "Bob",
        last_name: "Baker",
        nickname: None,
        // trailing blank is part of the seed, the phone check tolerates it
        phone_number: "770-423-6789 ",
        category_id: 1,
        date_created: (2025, 2, 11),
    },
    SeedContact {
        id: 3,
        first_name: "Charlie",
        last_name: "Baker",
        nickname: Some("Chuck"),
        phone_number: "476-543-2211",
        category_id: 3,
        date_created: (2025, 3, 12),
    },
];
