//! Cross-dialect rendering tests: the same criteria compiled against each
//! adapter must produce that engine's statement shape.

use torsion_adapters::{MssqlAdapter, MysqlAdapter, OracleAdapter, PostgresAdapter};
use torsion_sql::{
    Adapter, Column, Criteria, Database, Query, SqlBuilder, SqlOperator, Value,
};

fn build(criteria: &Criteria, adapter: Box<dyn Adapter>) -> Query {
    let database = Database::new("test", adapter);
    SqlBuilder::new()
        .build_query(criteria, &database)
        .expect("criteria should compile")
}

fn paged() -> Criteria {
    Criteria::new()
        .add_select_column(Column::new("book", "title"))
        .set_limit(20)
        .set_offset(10)
}

#[test]
fn pagination_per_dialect() {
    assert_eq!(
        build(&paged(), Box::new(MysqlAdapter::new())).to_string(),
        "SELECT book.title FROM book LIMIT 20 OFFSET 10"
    );
    assert_eq!(
        build(&paged(), Box::new(PostgresAdapter::new())).to_string(),
        "SELECT book.title FROM book LIMIT 20 OFFSET 10"
    );
    assert_eq!(
        build(&paged(), Box::new(OracleAdapter::new())).to_string(),
        "SELECT B.* FROM ( SELECT A.*, rownum AS TORQUE$ROWNUM FROM ( \
         SELECT book.title FROM book \
         ) A ) B WHERE B.TORQUE$ROWNUM > 10 AND B.TORQUE$ROWNUM <= 30"
    );
}

#[test]
fn pagination_leaves_replacements_untouched() {
    let criteria = paged().where_clause(Column::new("book", "in_print"), true);
    let query = build(&criteria, Box::new(OracleAdapter::new()));
    assert_eq!(
        query.prepared_statement_replacements(),
        vec![&Value::Bool(true)]
    );
}

#[test]
fn ignore_case_like_per_dialect() {
    let criteria = Criteria::new()
        .set_ignore_case(true)
        .where_op(Column::new("book", "title"), SqlOperator::Like, "moby*");
    assert_eq!(
        build(&criteria, Box::new(PostgresAdapter::new())).to_string(),
        "SELECT  FROM book WHERE book.title ILIKE ?"
    );
    assert_eq!(
        build(&criteria, Box::new(MysqlAdapter::new())).to_string(),
        "SELECT  FROM book WHERE UPPER(book.title) LIKE UPPER(?)"
    );
}

#[test]
fn not_ilike_stays_negated_on_ilike_dialects() {
    let criteria = Criteria::new().where_op(
        Column::new("book", "title"),
        SqlOperator::NotILike,
        "moby*",
    );
    assert_eq!(
        build(&criteria, Box::new(PostgresAdapter::new())).to_string(),
        "SELECT  FROM book WHERE book.title NOT ILIKE ?"
    );
}

#[test]
fn oracle_declares_escape_for_escaped_wildcards() {
    let criteria = Criteria::new().where_op(
        Column::new("book", "title"),
        SqlOperator::Like,
        "100\\%*",
    );
    let query = build(&criteria, Box::new(OracleAdapter::new()));
    assert_eq!(
        query.to_string(),
        "SELECT  FROM book WHERE book.title LIKE ? ESCAPE '\\'"
    );
    assert_eq!(
        query.prepared_statement_replacements(),
        vec![&Value::Text(String::from("100\\%%"))]
    );
}

#[test]
fn oracle_skips_escape_for_escaped_non_wildcards() {
    // An escaped ordinary character is unescaped into the bound pattern and
    // declares no ESCAPE clause.
    let criteria = Criteria::new().where_op(
        Column::new("book", "title"),
        SqlOperator::Like,
        "\\moby*",
    );
    let query = build(&criteria, Box::new(OracleAdapter::new()));
    assert_eq!(
        query.to_string(),
        "SELECT  FROM book WHERE book.title LIKE ?"
    );
    assert_eq!(
        query.prepared_statement_replacements(),
        vec![&Value::Text(String::from("moby%"))]
    );
}

#[test]
fn generic_dialects_omit_the_escape_clause() {
    let criteria = Criteria::new().where_op(
        Column::new("book", "title"),
        SqlOperator::Like,
        "100\\%*",
    );
    assert_eq!(
        build(&criteria, Box::new(MysqlAdapter::new())).to_string(),
        "SELECT  FROM book WHERE book.title LIKE ?"
    );
}

#[test]
fn mssql_rowcount_brackets_the_statement() {
    let criteria = Criteria::new()
        .add_select_column(Column::new("book", "title"))
        .where_clause(Column::new("book", "in_print"), true)
        .set_limit(20);
    assert_eq!(
        build(&criteria, Box::new(MssqlAdapter::new())).to_string(),
        "SET ROWCOUNT 20 SELECT book.title FROM book WHERE book.in_print=? SET ROWCOUNT 0"
    );
}

#[test]
fn except_spelling_per_dialect() {
    let first = Criteria::new().add_select_column(Column::new("book", "title"));
    let second = Criteria::new().add_select_column(Column::new("banned", "title"));
    let composite = first.except(second);
    assert!(build(&composite, Box::new(MysqlAdapter::new()))
        .to_string()
        .contains(" EXCEPT "));
    assert!(build(&composite, Box::new(OracleAdapter::new()))
        .to_string()
        .contains(" MINUS "));
}
