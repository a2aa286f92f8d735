use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::record::{NewPerson, PersonRecord, ANONYMIZED_NAME, SEED_PERSONS};
use crate::schema::TableDefinition;

/// What [`PersonStore::initialize`] found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The table was empty and this many demo rows were inserted
    Seeded(u64),
    /// The table already held this many rows; nothing was inserted
    Existing(u64),
}

/// Accessor for the `persons` table.
///
/// Holds only configuration. Every operation opens its own connection and
/// drops it before returning, on success and on error alike.
#[derive(Debug, Clone)]
pub struct PersonStore {
    config: StoreConfig,
    table: TableDefinition,
}

impl PersonStore {
    /// Create a store for the given config. Nothing is touched on disk.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            table: TableDefinition::persons(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Ensure the directory, the table, and the demo rows exist.
    ///
    /// Safe to call repeatedly: seeding only happens while the table is empty.
    /// Schema creation, the row count and the seed batch share one transaction.
    pub fn initialize(&self) -> Result<InitOutcome> {
        let path = self.config.db_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::StorageUnavailable {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        self.table.ensure(&tx)?;

        let existing = self.count_rows(&tx)?;
        let outcome = if existing == 0 {
            {
                let mut stmt = tx.prepare(&self.insert_statement())?;
                for (full_name, mail) in SEED_PERSONS {
                    stmt.execute(params![full_name, mail])?;
                }
            }
            InitOutcome::Seeded(SEED_PERSONS.len() as u64)
        } else {
            InitOutcome::Existing(existing)
        };
        tx.commit()?;

        match outcome {
            InitOutcome::Seeded(n) => {
                info!(path = %path.display(), "store created, seeded {} demo users", n)
            }
            InitOutcome::Existing(n) => {
                info!(path = %path.display(), "store already holds {} users", n)
            }
        }
        Ok(outcome)
    }

    /// Every record, ordered by id.
    pub fn list_all(&self) -> Result<Vec<PersonRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT user_id, full_name, mail FROM {} ORDER BY user_id",
            self.table.name
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(PersonRecord {
                user_id: row.get(0)?,
                full_name: row.get(1)?,
                mail: row.get(2)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.connect()?;
        self.count_rows(&conn)
    }

    /// Insert one record and return it with its assigned id.
    pub fn insert(&self, person: NewPerson) -> Result<PersonRecord> {
        if let Some(field) = person.missing_field() {
            return Err(StoreError::InvalidRecord(format!("{field} must not be empty")));
        }

        let conn = self.connect()?;
        conn.execute(
            &self.insert_statement(),
            params![person.full_name, person.mail],
        )?;
        Ok(PersonRecord {
            user_id: conn.last_insert_rowid(),
            full_name: person.full_name,
            mail: person.mail,
        })
    }

    /// Delete every record. The id sequence is left untouched, so ids are
    /// never handed out twice. Returns the number of deleted rows.
    pub fn wipe_all(&self) -> Result<u64> {
        let conn = self.connect()?;
        let deleted = conn.execute(&format!("DELETE FROM {}", self.table.name), [])? as u64;
        info!("wiped all user data ({} rows)", deleted);
        Ok(deleted)
    }

    /// Overwrite every name with [`ANONYMIZED_NAME`]; ids and mails are kept.
    /// Returns the number of updated rows.
    pub fn anonymize_all(&self) -> Result<u64> {
        let conn = self.connect()?;
        let updated = conn.execute(
            &format!("UPDATE {} SET full_name = ?1", self.table.name),
            params![ANONYMIZED_NAME],
        )? as u64;
        info!("anonymized {} user names", updated);
        Ok(updated)
    }

    fn connect(&self) -> Result<Connection> {
        let path = self.config.db_path();
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened sqlite connection");
        Ok(conn)
    }

    fn insert_statement(&self) -> String {
        format!(
            "INSERT INTO {} (full_name, mail) VALUES (?1, ?2)",
            self.table.name
        )
    }

    fn count_rows(&self, conn: &Connection) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table.name);
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
