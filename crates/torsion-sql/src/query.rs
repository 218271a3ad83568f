//! The compiled statement representation and its SQL renderer.

use std::fmt;

use crate::join::JoinType;
use crate::pspart::PreparedStatementPart;
use crate::value::Value;

/// The kind of statement a [`Query`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryType {
    /// SELECT statement.
    #[default]
    Select,
    /// UPDATE statement.
    Update,
    /// DELETE statement.
    Delete,
}

/// One entry of the FROM clause.
///
/// An element without a join type renders comma-separated; an element with a
/// join type renders preceded by its join keyword and followed by its ON
/// condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FromElement {
    expression: String,
    join_type: Option<JoinType>,
    condition: Option<PreparedStatementPart>,
}

impl FromElement {
    /// Creates a plain (comma-joined) FROM entry.
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            join_type: None,
            condition: None,
        }
    }

    /// Creates a joined FROM entry with its ON condition.
    #[must_use]
    pub fn joined(
        expression: impl Into<String>,
        join_type: JoinType,
        condition: PreparedStatementPart,
    ) -> Self {
        Self {
            expression: expression.into(),
            join_type: Some(join_type),
            condition: Some(condition),
        }
    }

    /// Returns the table (or subquery) expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the join type, or `None` for a comma-joined entry.
    #[must_use]
    pub const fn join_type(&self) -> Option<JoinType> {
        self.join_type
    }

    /// Returns the ON condition, if this is a joined entry.
    #[must_use]
    pub const fn condition(&self) -> Option<&PreparedStatementPart> {
        self.condition.as_ref()
    }
}

/// The value assigned to a column in an UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateValue {
    /// A bound placeholder value, rendered as `column=?`.
    Param(Value),
    /// A computed SQL expression, rendered as `column=<expr>`.
    Expression(String),
}

/// The intermediate representation of a compiled statement.
///
/// Populated by the compiler pipeline and rendered to SQL text via
/// [`fmt::Display`]. For composite queries (set operations) the single
/// statement fields are ignored during rendering; only `parts`, the part
/// operator and the shared trailing clauses apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    query_type: QueryType,
    select_modifiers: Vec<String>,
    select_clause: Vec<String>,
    update_assignments: Vec<(String, UpdateValue)>,
    from_clause: Vec<FromElement>,
    where_clause: Vec<String>,
    where_replacements: Vec<Value>,
    group_by: Vec<String>,
    having: Option<String>,
    order_by: Vec<String>,
    limit: Option<String>,
    offset: Option<String>,
    row_count: Option<String>,
    pre_limit: Option<String>,
    post_limit: Option<String>,
    for_update: Option<String>,
    fetch_size: Option<i32>,
    parts: Vec<Query>,
    part_operator: Option<String>,
}

impl Query {
    /// Creates an empty query of the given statement type.
    #[must_use]
    pub fn new(query_type: QueryType) -> Self {
        Self {
            query_type,
            ..Self::default()
        }
    }

    /// Returns the statement type.
    #[must_use]
    pub const fn query_type(&self) -> QueryType {
        self.query_type
    }

    /// Changes the statement type.
    pub fn set_query_type(&mut self, query_type: QueryType) {
        self.query_type = query_type;
    }

    /// Adds a select modifier such as `DISTINCT`.
    pub fn add_select_modifier(&mut self, modifier: impl Into<String>) {
        self.select_modifiers.push(modifier.into());
    }

    /// Adds an expression to the SELECT clause.
    pub fn add_select_column(&mut self, expression: impl Into<String>) {
        self.select_clause.push(expression.into());
    }

    /// Returns the SELECT clause expressions.
    #[must_use]
    pub fn select_clause(&self) -> &[String] {
        &self.select_clause
    }

    /// Adds an UPDATE SET assignment.
    pub fn add_update_assignment(&mut self, column: impl Into<String>, value: UpdateValue) {
        self.update_assignments.push((column.into(), value));
    }

    /// Adds a FROM clause entry unless an entry with the same expression is
    /// already present; first-seen order wins.
    ///
    /// Returns true if the element was added.
    pub fn add_from(&mut self, element: FromElement) -> bool {
        if self.contains_from(&element.expression) {
            return false;
        }
        self.from_clause.push(element);
        true
    }

    /// Returns true if the FROM clause already holds the exact expression.
    #[must_use]
    pub fn contains_from(&self, expression: &str) -> bool {
        self.from_clause
            .iter()
            .any(|element| element.expression == expression)
    }

    /// Returns the FROM clause entries.
    #[must_use]
    pub fn from_clause(&self) -> &[FromElement] {
        &self.from_clause
    }

    /// Replaces the inferred FROM clause with explicitly supplied elements.
    pub fn replace_from(&mut self, elements: Vec<FromElement>) {
        self.from_clause = elements;
    }

    /// Adds a WHERE fragment with its replacements. Re-adding a fragment
    /// with identical SQL text is a no-op (replacements included).
    pub fn add_where(&mut self, part: PreparedStatementPart) {
        let (sql, replacements) = part.into_parts();
        if self.where_clause.contains(&sql) {
            return;
        }
        self.where_clause.push(sql);
        self.where_replacements.extend(replacements);
    }

    /// Returns the WHERE fragments.
    #[must_use]
    pub fn where_clause(&self) -> &[String] {
        &self.where_clause
    }

    /// Adds a GROUP BY expression.
    pub fn add_group_by(&mut self, expression: impl Into<String>) {
        self.group_by.push(expression.into());
    }

    /// Sets the HAVING condition text. Its replacements are appended to the
    /// WHERE replacement list, after all WHERE values.
    pub fn set_having(&mut self, part: PreparedStatementPart) {
        let (sql, replacements) = part.into_parts();
        self.having = Some(sql);
        self.where_replacements.extend(replacements);
    }

    /// Adds an ORDER BY entry (already rendered, e.g. `t.a ASC`).
    pub fn add_order_by(&mut self, expression: impl Into<String>) {
        self.order_by.push(expression.into());
    }

    /// Sets the LIMIT clause text.
    pub fn set_limit(&mut self, limit: Option<String>) {
        self.limit = limit;
    }

    /// Sets the OFFSET clause text.
    pub fn set_offset(&mut self, offset: Option<String>) {
        self.offset = offset;
    }

    /// Sets the `SET ROWCOUNT` value emitted around the statement.
    pub fn set_row_count(&mut self, row_count: Option<String>) {
        self.row_count = row_count;
    }

    /// Sets text prepended before the whole statement (dialect pagination).
    pub fn set_pre_limit(&mut self, pre_limit: Option<String>) {
        self.pre_limit = pre_limit;
    }

    /// Sets text appended after the whole statement (dialect pagination).
    pub fn set_post_limit(&mut self, post_limit: Option<String>) {
        self.post_limit = post_limit;
    }

    /// Sets the update-lock clause. The literal `FOR UPDATE` renders at the
    /// statement end; any other clause renders inline after the FROM clause.
    pub fn set_for_update(&mut self, for_update: Option<String>) {
        self.for_update = for_update;
    }

    /// Sets the JDBC-style fetch size hint (not rendered into SQL).
    pub fn set_fetch_size(&mut self, fetch_size: Option<i32>) {
        self.fetch_size = fetch_size;
    }

    /// Returns the fetch size hint.
    #[must_use]
    pub const fn fetch_size(&self) -> Option<i32> {
        self.fetch_size
    }

    /// Appends a child statement of a composite (set-operation) query.
    pub fn add_part(&mut self, part: Query) {
        self.parts.push(part);
    }

    /// Returns the child statements of a composite query.
    #[must_use]
    pub fn parts(&self) -> &[Query] {
        &self.parts
    }

    /// Sets the set-operation keyword joining the parts, e.g. `UNION ALL`.
    pub fn set_part_operator(&mut self, operator: impl Into<String>) {
        self.part_operator = Some(operator.into());
    }

    /// Returns the values binding to the statement's `?` placeholders, in
    /// left-to-right placeholder order: UPDATE assignments first (for UPDATE
    /// statements), then FROM join conditions depth-first, then WHERE and
    /// HAVING, then composite parts recursively.
    #[must_use]
    pub fn prepared_statement_replacements(&self) -> Vec<&Value> {
        let mut replacements = Vec::new();
        self.collect_replacements(&mut replacements);
        replacements
    }

    fn collect_replacements<'a>(&'a self, out: &mut Vec<&'a Value>) {
        if !self.parts.is_empty() {
            for part in &self.parts {
                part.collect_replacements(out);
            }
            return;
        }
        if self.query_type == QueryType::Update {
            for (_, value) in &self.update_assignments {
                if let UpdateValue::Param(value) = value {
                    out.push(value);
                }
            }
        }
        // The leading element renders bare (a join needs a table to its
        // left), so its condition contributes no placeholders either.
        for element in self.from_clause.iter().skip(1) {
            if let (Some(_), Some(condition)) = (element.join_type, &element.condition) {
                out.extend(condition.replacements());
            }
        }
        out.extend(&self.where_replacements);
    }

    fn fmt_from_clause(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, element) in self.from_clause.iter().enumerate() {
            match element.join_type {
                Some(join_type) if index > 0 => {
                    write!(f, " {} {}", join_type.as_str(), element.expression)?;
                    if let Some(condition) = &element.condition {
                        write!(f, " ON {}", condition.sql())?;
                    }
                }
                _ => {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&element.expression)?;
                }
            }
        }
        Ok(())
    }

    fn fmt_single_statement(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.query_type {
            QueryType::Select => {
                f.write_str("SELECT ")?;
                for modifier in &self.select_modifiers {
                    write!(f, "{modifier} ")?;
                }
                f.write_str(&self.select_clause.join(", "))?;
                f.write_str(" FROM ")?;
                self.fmt_from_clause(f)?;
            }
            QueryType::Update => {
                f.write_str("UPDATE ")?;
                self.fmt_from_clause(f)?;
                f.write_str(" SET ")?;
                let assignments: Vec<String> = self
                    .update_assignments
                    .iter()
                    .map(|(column, value)| match value {
                        UpdateValue::Param(_) => format!("{column}=?"),
                        UpdateValue::Expression(expr) => format!("{column}={expr}"),
                    })
                    .collect();
                f.write_str(&assignments.join(", "))?;
            }
            QueryType::Delete => {
                f.write_str("DELETE FROM ")?;
                self.fmt_from_clause(f)?;
            }
        }
        // Dialect-specific lock clauses attach to the table reference.
        if let Some(for_update) = &self.for_update {
            if for_update != "FOR UPDATE" {
                write!(f, " {for_update}")?;
            }
        }
        if !self.where_clause.is_empty() {
            write!(f, " WHERE {}", self.where_clause.join(" AND "))?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", self.group_by.join(", "))?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pre_limit) = &self.pre_limit {
            f.write_str(pre_limit)?;
        }
        if let Some(row_count) = &self.row_count {
            write!(f, "SET ROWCOUNT {row_count} ")?;
        }
        if self.parts.is_empty() {
            self.fmt_single_statement(f)?;
        } else {
            let operator = self.part_operator.as_deref().unwrap_or("UNION");
            for (index, part) in self.parts.iter().enumerate() {
                if index > 0 {
                    write!(f, " {operator} ")?;
                }
                write!(f, "({part})")?;
            }
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", self.order_by.join(", "))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        if self.row_count.is_some() {
            f.write_str(" SET ROWCOUNT 0")?;
        }
        if let Some(post_limit) = &self.post_limit {
            f.write_str(post_limit)?;
        }
        if let Some(for_update) = &self.for_update {
            if for_update == "FOR UPDATE" {
                write!(f, " {for_update}")?;
            }
        }
        Ok(())
    }
}
