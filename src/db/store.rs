//! request scoped access to the db;
//! a `Store` only knows where the db lives, every unit of work opens its
//! own connection and drops it once done (whether it failed or not)

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use tracing::info;

use crate::error::Result;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    // shared cache uri, see Store::memory
    Memory(String),
}

#[derive(Debug, Clone)]
pub struct Store {
    location: Location,
    // a shared cache in memory db lives as long as one connection to it
    // does; held, never used
    _keepalive: Option<Arc<Mutex<Connection>>>,
}

impl Store {
    /// open (or create) the db file at `path`;
    /// a db w/o tables gets initialized, every db gets checked
    pub fn open(path: &Path) -> Result<Store> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                info!("folder doesn't exist, creating: {:?}", dir);
                fs::create_dir_all(dir)?;
            }
        }

        let store = Store {
            location: Location::File(path.to_path_buf()),
            _keepalive: None,
        };

        let mut conn = store.connect()?;
        // init is one transaction, a failed attempt leaves no tables behind
        if super::is_empty(&conn)? {
            info!("db has no tables, initializing: {:?}", path);
            super::init(&mut conn)?;
        }
        super::check(&conn)?;

        Ok(store)
    }

    /// a fresh, initialized in memory db; every call gets its own
    pub fn memory() -> Result<Store> {
        static NEXT: AtomicUsize = AtomicUsize::new(0);

        let uri = format!(
            "file:addressbook-{}-{}?mode=memory&cache=shared",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        );

        let mut store = Store {
            location: Location::Memory(uri),
            _keepalive: None,
        };

        let mut conn = store.connect()?;
        super::init(&mut conn)?;
        super::check(&conn)?;
        store._keepalive = Some(Arc::new(Mutex::new(conn)));

        Ok(store)
    }

    /// open a connection w/ foreign key enforcement turned on
    pub fn connect(&self) -> Result<Connection> {
        let conn = match &self.location {
            Location::File(path) => Connection::open(path)?,
            Location::Memory(uri) => Connection::open_with_flags(
                uri,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?,
        };

        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        Ok(conn)
    }

    /// run `work` against its own connection on the blocking pool
    pub async fn run<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = store.connect()?;
            work(&mut conn)
        })
        .await?
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn memory_stores_are_isolated()
    {
        let a = Store::memory().unwrap();
        let b = Store::memory().unwrap();

        a.run(|conn| db::delete_contact(conn, 1)).await.unwrap();

        let left_a = a.run(|conn| db::get_contacts(conn)).await.unwrap();
        let left_b = b.run(|conn| db::get_contacts(conn)).await.unwrap();

        assert_eq!(left_a.len(), 2);
        assert_eq!(left_b.len(), 3);
    }

    #[tokio::test]
    async fn connections_enforce_foreign_keys()
    {
        let store = Store::memory().unwrap();

        let enabled : bool = store
            .run(|conn| {
                Ok(conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?)
            })
            .await
            .unwrap();

        assert!(enabled);
    }

    #[test]
    fn file_store_initializes_once()
    {
        let dir = std::env::temp_dir()
            .join(format!("addressbook-store-{}", std::process::id()));
        let path = dir.join("nested").join("addressbook.db");
        let _ = fs::remove_dir_all(&dir);

        let store = Store::open(&path).unwrap();
        let conn = store.connect().unwrap();
        db::delete_contact(&conn, 3).unwrap();
        drop(conn);

        // reopening must not seed again
        let store = Store::open(&path).unwrap();
        let conn = store.connect().unwrap();
        assert_eq!(db::get_contacts(&conn).unwrap().len(), 2);
        drop(conn);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_file_gets_initialized()
    {
        let dir = std::env::temp_dir()
            .join(format!("addressbook-empty-{}", std::process::id()));
        let path = dir.join("addressbook.db");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        // left behind by an earlier start whose init never went through
        fs::File::create(&path).unwrap();

        let store = Store::open(&path).unwrap();
        let conn = store.connect().unwrap();
        assert_eq!(db::get_contacts(&conn).unwrap().len(), 3);
        drop(conn);

        let _ = fs::remove_dir_all(&dir);
    }
}
