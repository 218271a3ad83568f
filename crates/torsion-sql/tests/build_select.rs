//! Tests for SELECT compilation: select list, FROM inference, WHERE
//! grouping, GROUP BY, HAVING, ORDER BY and the trailing clauses.

mod common;
use common::*;

use torsion_sql::{
    Column, Criteria, Criterion, Database, FromElement, GenericAdapter, SqlBuilder, SqlOperator,
    Value,
};

#[test]
fn from_clause_is_distinct_in_first_reference_order() {
    let criteria = Criteria::new()
        .add_select_column(col("book", "title"))
        .add_select_column(col("author", "name"))
        .add_select_column(col("book", "isbn"))
        .add_select_column(col("publisher", "name"));
    let query = build(&criteria);
    assert_eq!(
        query.to_string(),
        "SELECT book.title, author.name, book.isbn, publisher.name \
         FROM book, author, publisher"
    );
}

#[test]
fn repeated_and_conditions_render_one_flat_group() {
    let criteria = Criteria::new()
        .where_clause(col("myTable", "myColumn1"), "1a")
        .and(col("myTable", "myColumn1"), "1b")
        .and(col("myTable", "myColumn2"), "2a");
    let query = build(&criteria);
    assert_eq!(
        query.to_string(),
        "SELECT  FROM myTable WHERE (myTable.myColumn1=? AND myTable.myColumn1=? AND myTable.myColumn2=?)"
    );
    let replacements = query.prepared_statement_replacements();
    assert_eq!(
        replacements,
        vec![
            &Value::Text(String::from("1a")),
            &Value::Text(String::from("1b")),
            &Value::Text(String::from("2a")),
        ]
    );
}

#[test]
fn mixed_conjunctions_nest_with_parentheses() {
    let criteria = Criteria::new()
        .where_clause(col("book", "a"), "1")
        .and(col("book", "b"), "2")
        .or(col("book", "c"), "3");
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT  FROM book WHERE ((book.a=? AND book.b=?) OR book.c=?)"
    );
}

#[test]
fn replacement_count_matches_placeholders() {
    let criteria = Criteria::new()
        .add_select_column(col("book", "title"))
        .where_op(col("book", "id"), SqlOperator::In, vec![
            Value::Int(1),
            Value::Int(2),
            Value::Null,
        ])
        .and(col("book", "title"), "moby")
        .and_verbatim("book.pages > ?", vec![Value::Int(100)]);
    let query = build(&criteria);
    assert_eq!(
        query.prepared_statement_replacements().len(),
        placeholder_count(&query.to_string())
    );
}

#[test]
fn distinct_modifier_renders_before_columns() {
    let criteria = Criteria::new()
        .distinct()
        .add_select_column(col("book", "author_id"));
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT DISTINCT book.author_id FROM book"
    );
}

#[test]
fn group_by_and_having() {
    let criteria = Criteria::new()
        .add_select_column(col("book", "author_id"))
        .add_select_column(Column::from_table_expression("book", "COUNT(*)"))
        .add_group_by_column(col("book", "author_id"))
        .set_having(Criterion::verbatim("COUNT(*) > ?", vec![Value::Int(5)]));
    let query = build(&criteria);
    assert_eq!(
        query.to_string(),
        "SELECT book.author_id, COUNT(*) FROM book \
         GROUP BY book.author_id HAVING COUNT(*) > ?"
    );
    assert_eq!(query.prepared_statement_replacements(), vec![&Value::Int(5)]);
}

#[test]
fn order_by_renders_direction() {
    let criteria = Criteria::new()
        .add_select_column(col("book", "title"))
        .add_ascending_order_by(col("book", "title"))
        .add_descending_order_by(col("book", "published"));
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT book.title FROM book ORDER BY book.title ASC, book.published DESC"
    );
}

#[test]
fn order_by_does_not_fold_function_expressions() {
    let criteria = Criteria::new()
        .set_ignore_case(true)
        .add_select_column(col("book", "title"))
        .add_ascending_order_by(Column::from_table_expression("book", "TRIM(book.title)"));
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT book.title FROM book ORDER BY TRIM(book.title) ASC"
    );
}

#[test]
fn explicit_from_elements_replace_inference() {
    let criteria = Criteria::new()
        .add_select_column(col("book", "title"))
        .where_clause(col("book", "id"), 1_i64)
        .add_from(FromElement::new("book partition (p1)"));
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT book.title FROM book partition (p1) WHERE book.id=?"
    );
}

#[test]
fn verbatim_condition_adds_no_tables() {
    let criteria = Criteria::new()
        .add_select_column(col("book", "title"))
        .and_verbatim("EXISTS (SELECT 1 FROM loan WHERE loan.book_id = book.id)", vec![]);
    assert_eq!(
        build(&criteria).to_string(),
        "SELECT book.title FROM book \
         WHERE EXISTS (SELECT 1 FROM loan WHERE loan.book_id = book.id)"
    );
}

#[test]
fn fetch_size_is_carried_verbatim() {
    let criteria = Criteria::new()
        .add_select_column(col("book", "title"))
        .set_fetch_size(500);
    assert_eq!(build(&criteria).fetch_size(), Some(500));
}

#[test]
fn rendering_twice_is_identical() {
    let criteria = Criteria::new()
        .set_ignore_case(true)
        .add_select_column(col("book", "title"))
        .where_op(col("book", "title"), SqlOperator::Like, "*moby*")
        .add_ascending_order_by(col("book", "title"))
        .set_limit(10)
        .set_offset(5);
    let database = Database::new("test", Box::new(GenericAdapter::new()));
    let query = SqlBuilder::new()
        .build_query(&criteria, &database)
        .expect("criteria should compile");
    let first = query.to_string();
    let second = query.to_string();
    assert_eq!(first, second);
}
