// module with logic shared across the crate's tests;
// every test works on its own in memory db, this makes sure they
// all start from the same, seeded layout

/*
 * WARNING; BE AWARE
 * tests assume the seed data from db::queries as is
 * (Alice Kelly/Friend, Bob Baker/Family, Charlie Baker/Work)
 */

use rusqlite::Connection;

pub fn initialize_db() -> Connection
{
    let mut conn = Connection::open_in_memory()
        .unwrap_or_else(|_| panic!("Can't open in memory test db"));

    conn.pragma_update(None, "foreign_keys", true)
        .unwrap_or_else(|_| panic!("Can't enable foreign keys on test db"));

    crate::db::init(&mut conn)
        .unwrap_or_else(|e| panic!("Can't initialize test db: {}", e));

    conn
}
