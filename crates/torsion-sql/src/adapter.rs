//! Database dialect capabilities.
//!
//! The compiler is dialect-agnostic; everything database-specific comes in
//! through the [`Adapter`] trait. Concrete adapters for real engines live in
//! the `torsion-adapters` crate; [`GenericAdapter`] covers ANSI SQL and is
//! what the core test suites run against.

use crate::error::Result;
use crate::map::DatabaseMap;
use crate::query::Query;

/// Dialect-specific behavior a database engine contributes to compilation.
pub trait Adapter: Send + Sync {
    /// Returns the adapter name.
    fn name(&self) -> &'static str;

    /// Injects limit/offset rendering into the query.
    ///
    /// Called only when a limit or offset was actually requested. The
    /// default uses ANSI `LIMIT n OFFSET m`; dialects may instead wrap the
    /// statement via pre/post-limit text or rowcount settings.
    fn generate_limits(&self, query: &mut Query, offset: u64, limit: i64) -> Result<()> {
        if limit >= 0 {
            query.set_limit(Some(limit.to_string()));
        }
        if offset > 0 {
            query.set_offset(Some(offset.to_string()));
        }
        Ok(())
    }

    /// Wraps an expression for case-insensitive comparison.
    fn ignore_case(&self, expression: &str) -> String {
        format!("UPPER({expression})")
    }

    /// Wraps an expression for case-insensitive ordering.
    ///
    /// Defaults to the comparison wrapping; dialects with case-insensitive
    /// collations may return the expression unchanged.
    fn ignore_case_in_order_by(&self, expression: &str) -> String {
        self.ignore_case(expression)
    }

    /// Returns true if the dialect supports native ILIKE.
    fn use_ilike(&self) -> bool {
        false
    }

    /// Returns true if LIKE patterns with escaped wildcards need an explicit
    /// `ESCAPE '\'` declaration.
    fn need_escape_clause(&self) -> bool {
        false
    }

    /// Returns the clause appended for pessimistic row locking.
    fn update_lock_clause(&self) -> &'static str {
        "FOR UPDATE"
    }

    /// Returns true if the dialect spells EXCEPT as MINUS.
    fn use_minus_for_except(&self) -> bool {
        false
    }
}

/// ANSI SQL adapter with no engine-specific behavior.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericAdapter;

impl GenericAdapter {
    /// Creates a new generic adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Adapter for GenericAdapter {
    fn name(&self) -> &'static str {
        "generic"
    }
}

/// One named database: its default schema, dialect adapter and column
/// metadata. Passed explicitly into the compiler entry points.
pub struct Database {
    name: String,
    schema: Option<String>,
    adapter: Box<dyn Adapter>,
    map: DatabaseMap,
}

impl Database {
    /// Creates a database with the given adapter and empty metadata.
    #[must_use]
    pub fn new(name: &str, adapter: Box<dyn Adapter>) -> Self {
        Self {
            name: String::from(name),
            schema: None,
            adapter,
            map: DatabaseMap::new(),
        }
    }

    /// Sets the default schema used to qualify unqualified table names.
    #[must_use]
    pub fn with_schema(mut self, schema: &str) -> Self {
        self.schema = Some(String::from(schema));
        self
    }

    /// Installs column metadata.
    #[must_use]
    pub fn with_map(mut self, map: DatabaseMap) -> Self {
        self.map = map;
        self
    }

    /// Returns the database name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the default schema, if configured and non-empty.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref().filter(|schema| !schema.is_empty())
    }

    /// Returns the dialect adapter.
    #[must_use]
    pub fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    /// Returns the column metadata.
    #[must_use]
    pub const fn map(&self) -> &DatabaseMap {
        &self.map
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("adapter", &self.adapter.name())
            .finish_non_exhaustive()
    }
}
