//! Tests for the where-part strategy chain through the full compiler:
//! LIKE translation, IN lists, null handling, ignore-case dispatch and
//! custom strategies.

mod common;
use common::*;

use std::time::{Duration, Instant};

use torsion_sql::pspart::PreparedStatementPart;
use torsion_sql::whereclause::{WhereClauseChain, WherePartBuilder};
use torsion_sql::{
    ColumnMap, ColumnType, Criteria, Database, DatabaseMap, Error, GenericAdapter, Result,
    SqlBuilder, SqlOperator, TableMap, Value, WhereClauseExpression,
};

#[test]
fn like_translates_wildcards() {
    let criteria = Criteria::new().where_op(
        col("book", "title"),
        SqlOperator::Like,
        "*v%al_e2?",
    );
    let query = build(&criteria);
    assert_eq!(query.to_string(), "SELECT  FROM book WHERE book.title LIKE ?");
    assert_eq!(
        query.prepared_statement_replacements(),
        vec![&Value::Text(String::from("%v%al_e2_"))]
    );
}

#[test]
fn like_without_wildcards_becomes_equality() {
    let criteria = Criteria::new()
        .set_ignore_case(true)
        .where_op(col("book", "title"), SqlOperator::Like, "moby");
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT  FROM book WHERE UPPER(book.title)=UPPER(?)"
    );
}

#[test]
fn not_like_negates_the_degenerate_equality() {
    let criteria = Criteria::new().where_op(col("book", "title"), SqlOperator::NotLike, "moby");
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT  FROM book WHERE book.title<>?"
    );
}

#[test]
fn in_list_splits_null_entries() {
    let criteria = Criteria::new().where_op(
        col("t", "c"),
        SqlOperator::In,
        vec![
            Value::Text(String::from("a")),
            Value::Text(String::from("b")),
            Value::Null,
            Value::Null,
        ],
    );
    let query = build(&criteria);
    assert_eq!(
        query.to_string(),
        "SELECT  FROM t WHERE (t.c IN (?,?) OR t.c IS NULL)"
    );
    assert_eq!(
        query.prepared_statement_replacements(),
        vec![
            &Value::Text(String::from("a")),
            &Value::Text(String::from("b")),
        ]
    );
}

#[test]
fn not_in_list_with_null_conjoins_is_not_null() {
    let criteria = Criteria::new().where_op(
        col("t", "c"),
        SqlOperator::NotIn,
        vec![Value::Text(String::from("a")), Value::Null],
    );
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT  FROM t WHERE (t.c NOT IN (?) AND t.c IS NOT NULL)"
    );
}

#[test]
fn large_in_list_renders_in_linear_time() {
    let values: Vec<Value> = (0..10_000_i64).map(Value::Int).collect();
    let criteria = Criteria::new().where_op(col("t", "c"), SqlOperator::In, values);

    let start = Instant::now();
    let query = build(&criteria);
    let elapsed = start.elapsed();

    assert_eq!(query.prepared_statement_replacements().len(), 10_000);
    assert_eq!(placeholder_count(&query.to_string()), 10_000);
    assert!(
        elapsed < Duration::from_millis(200),
        "10k-element IN list took {elapsed:?}"
    );
}

#[test]
fn null_value_rewrites_any_operator() {
    let criteria = Criteria::new()
        .where_clause(col("book", "isbn"), Value::Null)
        .and_op(col("book", "pages"), SqlOperator::NotEqual, Value::Null);
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT  FROM book WHERE (book.isbn IS NULL AND book.pages IS NOT NULL)"
    );
}

#[test]
fn ignore_case_skips_non_textual_columns() {
    let map = DatabaseMap::new().with_table(
        TableMap::new("book")
            .with_column(ColumnMap::new("title", ColumnType::Varchar))
            .with_column(ColumnMap::new("pages", ColumnType::Integer)),
    );
    let database = Database::new("test", Box::new(GenericAdapter::new())).with_map(map);
    let criteria = Criteria::new()
        .set_ignore_case(true)
        .where_clause(col("book", "title"), "moby")
        .and(col("book", "pages"), 42_i64);
    let query = SqlBuilder::new()
        .build_query(&criteria, &database)
        .expect("criteria should compile");
    assert_eq!(
        query.to_string(),
        "SELECT  FROM book WHERE (UPPER(book.title)=UPPER(?) AND book.pages=?)"
    );
}

#[test]
fn unmapped_columns_default_to_textual() {
    let criteria = Criteria::new()
        .set_ignore_case(true)
        .where_clause(col("book", "title"), "moby");
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT  FROM book WHERE UPPER(book.title)=UPPER(?)"
    );
}

#[test]
fn per_condition_ignore_case_flag() {
    let criteria = Criteria::new().and_criterion(
        torsion_sql::Criterion::new(col("book", "title"), SqlOperator::Equal, "moby")
            .ignore_case(true),
    );
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT  FROM book WHERE UPPER(book.title)=UPPER(?)"
    );
}

#[derive(Debug)]
struct SoundexBuilder;

impl WherePartBuilder for SoundexBuilder {
    fn is_applicable(&self, expression: &WhereClauseExpression) -> bool {
        expression
            .l_value()
            .and_then(torsion_sql::Operand::as_column)
            .and_then(|c| c.name())
            .is_some_and(|name| name == "phonetic")
    }

    fn build_ps(
        &self,
        expression: &WhereClauseExpression,
        _ignore_case: bool,
        _database: &Database,
        _chain: &WhereClauseChain,
    ) -> Result<PreparedStatementPart> {
        let column = expression
            .l_value()
            .and_then(torsion_sql::Operand::as_column)
            .ok_or(Error::EmptyExpression)?;
        let mut part = PreparedStatementPart::from_sql(format!(
            "SOUNDEX({})=SOUNDEX(?)",
            column.sql_expression()
        ));
        if let Some(torsion_sql::Operand::Single(value)) = expression.r_value() {
            part.append(PreparedStatementPart::new("", vec![value.clone()]));
        }
        Ok(part)
    }
}

#[test]
fn custom_builders_take_priority() {
    let mut builder = SqlBuilder::new();
    builder.chain_mut().prepend(Box::new(SoundexBuilder));
    let criteria = Criteria::new().where_clause(col("person", "phonetic"), "smith");
    let query = builder
        .build_query(&criteria, &generic_db())
        .expect("criteria should compile");
    assert_eq!(
        query.to_string(),
        "SELECT  FROM person WHERE SOUNDEX(person.phonetic)=SOUNDEX(?)"
    );
    assert_eq!(
        query.prepared_statement_replacements(),
        vec![&Value::Text(String::from("smith"))]
    );
}
