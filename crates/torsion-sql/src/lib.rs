//! # torsion-sql
//!
//! A criteria-to-SQL compiler producing parameterized statements.
//!
//! This crate provides:
//! - A fluent [`Criteria`] API describing columns, conditions, joins,
//!   set operations and query options
//! - A [`SqlBuilder`] compiling criteria into a [`Query`] intermediate
//!   representation whose `to_string()` is the final SQL text
//! - An ordered replacement list matching the statement's `?` placeholders,
//!   ready for positional binding
//! - An [`Adapter`] trait through which database dialects control limit
//!   rendering, case folding, lock clauses and set-operator spelling
//!
//! ## Building a query
//!
//! ```rust
//! use torsion_sql::{Column, Criteria, Database, GenericAdapter, SqlBuilder};
//!
//! let criteria = Criteria::new()
//!     .add_select_column(Column::new("book", "title"))
//!     .where_clause(Column::new("book", "author_id"), 42_i64);
//!
//! let database = Database::new("bookstore", Box::new(GenericAdapter::new()));
//! let query = SqlBuilder::new().build_query(&criteria, &database).unwrap();
//!
//! assert_eq!(
//!     query.to_string(),
//!     "SELECT book.title FROM book WHERE book.author_id=?"
//! );
//! assert_eq!(query.prepared_statement_replacements().len(), 1);
//! ```
//!
//! ## Parameterization
//!
//! Values never land in the SQL text. Every condition renders a `?`
//! placeholder and contributes its value to the replacement list, in the
//! exact left-to-right order the placeholders appear: UPDATE assignments,
//! then FROM join conditions, then WHERE and HAVING.

pub mod adapter;
pub mod column;
pub mod criteria;
pub mod criterion;
pub mod error;
pub mod join;
mod join_builder;
pub mod map;
pub mod operator;
pub mod pspart;
pub mod query;
pub mod sql_builder;
pub mod value;
pub mod whereclause;

pub use adapter::{Adapter, Database, GenericAdapter};
pub use column::Column;
pub use criteria::{Criteria, OrderBy, OrderDirection, SetOperator};
pub use criterion::{Conjunction, Criterion, Operand, WhereClauseExpression};
pub use error::{Error, Result};
pub use join::{Join, JoinType};
pub use map::{ColumnMap, ColumnType, DatabaseMap, TableMap};
pub use operator::SqlOperator;
pub use pspart::PreparedStatementPart;
pub use query::{FromElement, Query, QueryType, UpdateValue};
pub use sql_builder::SqlBuilder;
pub use value::{SqlEnum, ToValue, Value};
pub use whereclause::{WhereClauseChain, WherePartBuilder};
