//! # torsion-adapters
//!
//! Concrete [`Adapter`](torsion_sql::Adapter) implementations for real
//! database engines. Each adapter contributes only what its dialect does
//! differently from ANSI SQL: limit/offset emulation, case folding,
//! LIKE escape declarations, lock clauses and set-operator spelling.
//!
//! ```rust
//! use torsion_sql::{Column, Criteria, Database, SqlBuilder};
//! use torsion_adapters::MysqlAdapter;
//!
//! let criteria = Criteria::new()
//!     .add_select_column(Column::new("book", "title"))
//!     .set_limit(10);
//!
//! let database = Database::new("bookstore", Box::new(MysqlAdapter::new()));
//! let query = SqlBuilder::new().build_query(&criteria, &database).unwrap();
//! assert_eq!(query.to_string(), "SELECT book.title FROM book LIMIT 10");
//! ```

mod mssql;
mod mysql;
mod oracle;
mod postgres;

pub use mssql::MssqlAdapter;
pub use mysql::MysqlAdapter;
pub use oracle::OracleAdapter;
pub use postgres::PostgresAdapter;
