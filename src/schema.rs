//! Declarative table definitions and schema checks.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Name of the table holding person records.
pub const PERSONS_TABLE: &str = "persons";

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    /// `PRIMARY KEY AUTOINCREMENT`: ids are never reused, even after deletes
    AutoIncrementKey,
    NotNull,
}

impl DataType {
    fn as_sql(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
        }
    }
}

impl ColumnConstraint {
    fn as_sql(self) -> &'static str {
        match self {
            ColumnConstraint::AutoIncrementKey => "PRIMARY KEY AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
        }
    }
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.as_sql());
        }
        sql
    }
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// The `persons` table: `user_id`, `full_name`, `mail`.
    pub fn persons() -> Self {
        Self::new(PERSONS_TABLE)
            .add_column(
                ColumnDefinition::new("user_id", DataType::Integer)
                    .with_constraint(ColumnConstraint::AutoIncrementKey),
            )
            .add_column(
                ColumnDefinition::new("full_name", DataType::Text)
                    .with_constraint(ColumnConstraint::NotNull),
            )
            .add_column(
                ColumnDefinition::new("mail", DataType::Text)
                    .with_constraint(ColumnConstraint::NotNull),
            )
    }

    /// Idempotent DDL for this table.
    pub fn create_statement(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDefinition::to_sql).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            columns.join(", ")
        )
    }

    fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    fn has_autoincrement(&self) -> bool {
        self.columns
            .iter()
            .any(|c| c.constraints.contains(&ColumnConstraint::AutoIncrementKey))
    }

    /// Create the table if missing, then check that the stored table has
    /// exactly the declared columns, in order, with matching type, NOT NULL
    /// and primary key flags.
    pub fn ensure(&self, conn: &Connection) -> Result<()> {
        conn.execute(&self.create_statement(), [])?;

        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", self.name))?;
        let existing = stmt
            .query_map([], |row| {
                Ok(StoredColumn {
                    name: row.get(1)?,
                    data_type: row.get(2)?,
                    not_null: row.get::<_, i64>(3)? != 0,
                    primary_key: row.get::<_, i64>(5)? != 0,
                })
            })?
            .collect::<rusqlite::Result<Vec<StoredColumn>>>()?;

        let names: Vec<&str> = existing.iter().map(|c| c.name.as_str()).collect();
        let expected = self.column_names();
        if names != expected {
            return Err(StoreError::Schema(format!(
                "table `{}` has columns [{}], expected [{}]",
                self.name,
                names.join(", "),
                expected.join(", ")
            )));
        }

        for (stored, column) in existing.iter().zip(&self.columns) {
            if let Some(problem) = stored.mismatch(column) {
                return Err(StoreError::Schema(format!(
                    "table `{}`, column `{}`: {}",
                    self.name, column.name, problem
                )));
            }
        }

        if self.has_autoincrement() {
            let sql: String = conn.query_row(
                "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [&self.name],
                |row| row.get(0),
            )?;
            if !sql.to_ascii_uppercase().contains("AUTOINCREMENT") {
                return Err(StoreError::Schema(format!(
                    "table `{}` does not use AUTOINCREMENT ids",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// One row of `PRAGMA table_info`.
struct StoredColumn {
    name: String,
    data_type: String,
    not_null: bool,
    primary_key: bool,
}

impl StoredColumn {
    fn mismatch(&self, column: &ColumnDefinition) -> Option<String> {
        let expected_type = column.data_type.as_sql();
        if !self.data_type.eq_ignore_ascii_case(expected_type) {
            return Some(format!("type {} (expected {})", self.data_type, expected_type));
        }
        let primary_key = column
            .constraints
            .contains(&ColumnConstraint::AutoIncrementKey);
        if self.primary_key != primary_key {
            return Some(format!(
                "primary key is {} (expected {})",
                self.primary_key, primary_key
            ));
        }
        let not_null = column.constraints.contains(&ColumnConstraint::NotNull);
        if self.not_null != not_null {
            return Some(format!("NOT NULL is {} (expected {})", self.not_null, not_null));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persons_table_renders_expected_ddl() {
        assert_eq!(
            TableDefinition::persons().create_statement(),
            "CREATE TABLE IF NOT EXISTS persons (user_id INTEGER PRIMARY KEY AUTOINCREMENT, \
             full_name TEXT NOT NULL, mail TEXT NOT NULL)"
        );
    }

    #[test]
    fn ensure_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        let table = TableDefinition::persons();
        table.ensure(&conn).unwrap();
        table.ensure(&conn).unwrap();
    }

    #[test]
    fn ensure_rejects_foreign_layout() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE persons (id INTEGER PRIMARY KEY, name TEXT);")
            .unwrap();

        let err = TableDefinition::persons().ensure(&conn).unwrap_err();
        assert!(matches!(err, StoreError::Schema(_)), "got {err:?}");
    }

    #[test]
    fn ensure_rejects_table_without_primary_key() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE persons (user_id INTEGER, full_name TEXT, mail TEXT);")
            .unwrap();

        let err = TableDefinition::persons().ensure(&conn).unwrap_err();
        assert!(matches!(err, StoreError::Schema(_)), "got {err:?}");
    }

    #[test]
    fn ensure_rejects_nullable_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE persons (user_id INTEGER PRIMARY KEY AUTOINCREMENT, \
             full_name TEXT, mail TEXT NOT NULL);",
        )
        .unwrap();

        let err = TableDefinition::persons().ensure(&conn).unwrap_err();
        assert!(matches!(err, StoreError::Schema(_)), "got {err:?}");
    }

    #[test]
    fn ensure_rejects_key_without_autoincrement() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE persons (user_id INTEGER PRIMARY KEY, \
             full_name TEXT NOT NULL, mail TEXT NOT NULL);",
        )
        .unwrap();

        let err = TableDefinition::persons().ensure(&conn).unwrap_err();
        assert!(matches!(err, StoreError::Schema(_)), "got {err:?}");
    }
}
