//! PQL statement builder.
//!
//! Clauses are collected on a [`StatementBuilder`] and rendered into a
//! [`Statement`]: the query text plus its bound parameters.
//!
//! ```
//! use pql::statement::{SortOrder, StatementBuilder};
//!
//! let statement = StatementBuilder::new()
//!     .select(["id", "name"])
//!     .from("Line_Item")
//!     .where_("status = :status")
//!     .order_by("id", SortOrder::Desc)
//!     .limit(500)
//!     .bind("status", "DELIVERING")
//!     .unwrap()
//!     .to_statement()
//!     .unwrap();
//!
//! assert_eq!(
//!     statement.query,
//!     "SELECT id,name FROM Line_Item WHERE status = :status ORDER BY id DESC LIMIT 500"
//! );
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PqlError, PqlResult};
use crate::value::{Coercer, NativeValue, TypedValue};

/// Sort direction, applied to the whole field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// `true` means ascending.
impl From<bool> for SortOrder {
    fn from(ascending: bool) -> Self {
        if ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

/// One field name or an ordered list of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList(Vec<String>);

impl FieldList {
    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl From<&str> for FieldList {
    fn from(field: &str) -> Self {
        FieldList(vec![field.to_string()])
    }
}

impl From<String> for FieldList {
    fn from(field: String) -> Self {
        FieldList(vec![field])
    }
}

impl<S: Into<String>> From<Vec<S>> for FieldList {
    fn from(fields: Vec<S>) -> Self {
        FieldList(fields.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for FieldList {
    fn from(fields: [S; N]) -> Self {
        FieldList(fields.into_iter().map(Into::into).collect())
    }
}

impl<S: Clone + Into<String>> From<&[S]> for FieldList {
    fn from(fields: &[S]) -> Self {
        FieldList(fields.iter().cloned().map(Into::into).collect())
    }
}

/// ORDER BY fields and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub fields: FieldList,
    pub order: SortOrder,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fields, self.order.as_str())
    }
}

/// LIMIT clause: a count, or an offset followed by a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset_or_count: u64,
    pub count: Option<u64>,
}

impl Limit {
    pub fn new(count: u64) -> Self {
        Self {
            offset_or_count: count,
            count: None,
        }
    }

    /// A `count` of zero is treated as absent, leaving `LIMIT offset`.
    pub fn with_offset(offset: u64, count: u64) -> Self {
        Self {
            offset_or_count: offset,
            count: (count != 0).then_some(count),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            Some(count) => write!(f, "{},{}", self.offset_or_count, count),
            None => write!(f, "{}", self.offset_or_count),
        }
    }
}

/// The optional clauses of a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clauses {
    pub select: Option<Vec<String>>,
    pub from: Option<String>,
    pub where_: Option<String>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Limit>,
}

impl Clauses {
    /// Render the query text.
    ///
    /// SELECT and FROM must be given together. Empty table and filter
    /// strings count as absent.
    pub fn render(&self) -> PqlResult<String> {
        let from = self.from.as_deref().filter(|t| !t.is_empty());

        let mut query = match (&self.select, from) {
            (Some(columns), Some(table)) => format!("SELECT {} FROM {}", columns.join(","), table),
            (Some(_), None) => return Err(PqlError::missing_clause("FROM")),
            (None, Some(_)) => return Err(PqlError::missing_clause("SELECT")),
            (None, None) => String::new(),
        };

        if let Some(clause) = self.where_.as_deref().filter(|c| !c.is_empty()) {
            query.push_str(" WHERE ");
            query.push_str(clause);
        }

        if let Some(order) = &self.order_by {
            query.push_str(&format!(" ORDER BY {}", order));
        }

        if let Some(limit) = &self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(query.trim().to_string())
    }
}

/// A named parameter value referenced from the query text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundParameter {
    pub key: String,
    pub value: TypedValue,
}

/// A rendered statement: query text plus bound parameters in binding order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub query: String,
    pub values: Vec<BoundParameter>,
}

impl Statement {
    /// Look up a bound value by key.
    pub fn value(&self, key: &str) -> Option<&TypedValue> {
        self.values.iter().find(|p| p.key == key).map(|p| &p.value)
    }

    pub fn to_json(&self) -> PqlResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> PqlResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Fluent builder for a [`Statement`].
///
/// Each clause setter replaces whatever was set before. Values are coerced
/// as they are bound, so a bad value fails at `bind`, not at render time.
#[derive(Debug, Clone, Default)]
pub struct StatementBuilder {
    clauses: Clauses,
    values: IndexMap<String, TypedValue>,
    coercer: Coercer,
}

impl StatementBuilder {
    /// Create an empty builder using the default namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder that coerces with `coercer`.
    pub fn with_coercer(coercer: Coercer) -> Self {
        Self {
            coercer,
            ..Self::default()
        }
    }

    /// Set the projection list.
    pub fn select(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.clauses.select = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the source table.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.clauses.from = Some(table.into());
        self
    }

    /// Set the filter clause. The last call wins; calls are not AND-ed.
    pub fn where_(mut self, clause: impl Into<String>) -> Self {
        self.clauses.where_ = Some(clause.into());
        self
    }

    /// Order by one or more fields, with one direction for the whole list.
    pub fn order_by(mut self, fields: impl Into<FieldList>, order: impl Into<SortOrder>) -> Self {
        self.clauses.order_by = Some(OrderBy {
            fields: fields.into(),
            order: order.into(),
        });
        self
    }

    /// `LIMIT count`.
    pub fn limit(mut self, count: u64) -> Self {
        self.clauses.limit = Some(Limit::new(count));
        self
    }

    /// `LIMIT offset,count`. A zero `count` renders as `LIMIT offset`.
    pub fn limit_offset(mut self, offset: u64, count: u64) -> Self {
        self.clauses.limit = Some(Limit::with_offset(offset, count));
        self
    }

    /// Coerce `value` and bind it under `key`.
    ///
    /// Rebinding a key replaces its value but keeps its original position.
    pub fn bind(mut self, key: impl Into<String>, value: impl Into<NativeValue>) -> PqlResult<Self> {
        let key = key.into();
        let value = self.coercer.coerce(value)?;
        tracing::debug!("Bound '{}' as {}", key, value.type_tag());
        self.values.insert(key, value);
        Ok(self)
    }

    pub fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    pub fn coercer(&self) -> &Coercer {
        &self.coercer
    }

    /// Render the statement. The builder is left untouched, so rendering
    /// twice gives the same result.
    pub fn to_statement(&self) -> PqlResult<Statement> {
        let query = self.clauses.render()?;
        let values = self
            .values
            .iter()
            .map(|(key, value)| BoundParameter {
                key: key.clone(),
                value: value.clone(),
            })
            .collect::<Vec<_>>();

        tracing::debug!("Rendered statement '{}' with {} value(s)", query, values.len());
        Ok(Statement { query, values })
    }
}
