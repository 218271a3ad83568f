#![allow(dead_code)]

use torsion_sql::{Column, Criteria, Database, GenericAdapter, Query, SqlBuilder};

/// Builds against the ANSI adapter, panicking on compile errors.
pub fn build(criteria: &Criteria) -> Query {
    SqlBuilder::new()
        .build_query(criteria, &generic_db())
        .expect("criteria should compile")
}

pub fn generic_db() -> Database {
    Database::new("test", Box::new(GenericAdapter::new()))
}

pub fn col(table: &str, name: &str) -> Column {
    Column::new(table, name)
}

/// Counts the literal `?` placeholders in rendered SQL.
pub fn placeholder_count(sql: &str) -> usize {
    sql.matches('?').count()
}
