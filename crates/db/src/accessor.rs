//! Generic table accessor.
//!
//! A [`TableAccessor`] is bound to one [`Table`] (a table name, its primary
//! key and the column list a row struct is decoded from) and exposes the six
//! operations every resource needs: `find`, `find_one`, `create`, `update`,
//! `delete` and `count`.
//!
//! Filters are conjunctions of equality conditions plus a case-insensitive
//! substring match. Column names are `&'static str` chosen in code; every
//! value is sent as a bound parameter with its SQL type, including nulls.

use std::marker::PhantomData;

use chrono::NaiveDate;
use dreamhome_core::types::Timestamp;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

// ---------------------------------------------------------------------------
// Table binding
// ---------------------------------------------------------------------------

/// A row type bound to one table.
pub trait Table: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Table name.
    const NAME: &'static str;
    /// Primary key column.
    const PRIMARY_KEY: &'static str;
    /// Comma-separated columns selected and returned for this row type.
    const COLUMNS: &'static str;
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A typed, nullable column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(Option<String>),
    BigInt(Option<i64>),
    Double(Option<f64>),
    Bool(Option<bool>),
    Date(Option<NaiveDate>),
    Timestamp(Option<Timestamp>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Text(v) => v.is_none(),
            Value::BigInt(v) => v.is_none(),
            Value::Double(v) => v.is_none(),
            Value::Bool(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
        }
    }

    fn push_bind(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self.clone() {
            Value::Text(v) => {
                qb.push_bind(v);
            }
            Value::BigInt(v) => {
                qb.push_bind(v);
            }
            Value::Double(v) => {
                qb.push_bind(v);
            }
            Value::Bool(v) => {
                qb.push_bind(v);
            }
            Value::Date(v) => {
                qb.push_bind(v);
            }
            Value::Timestamp(v) => {
                qb.push_bind(v);
            }
        }
    }
}

macro_rules! value_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(Some(v))
            }
        }

        impl From<Option<$ty>> for Value {
            fn from(v: Option<$ty>) -> Self {
                Value::$variant(v)
            }
        }
    };
}

value_from!(Text, String);
value_from!(BigInt, i64);
value_from!(Double, f64);
value_from!(Bool, bool);
value_from!(Date, NaiveDate);
value_from!(Timestamp, Timestamp);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Some(v.to_string()))
    }
}

impl From<Option<&str>> for Value {
    fn from(v: Option<&str>) -> Self {
        Value::Text(v.map(str::to_string))
    }
}

// ---------------------------------------------------------------------------
// Filters and queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    /// `column = value`, or `column IS NULL` for a null value.
    Eq(&'static str, Value),
    /// Case-insensitive substring match.
    Contains(&'static str, String),
}

/// Conjunction of conditions. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the table's primary key.
    pub fn by_key<T: Table>(key: impl Into<Value>) -> Self {
        Self::new().eq(T::PRIMARY_KEY, key)
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq(column, value.into()));
        self
    }

    pub fn contains(mut self, column: &'static str, needle: impl Into<String>) -> Self {
        self.conditions
            .push(Condition::Contains(column, needle.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (i, condition) in self.conditions.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            match condition {
                Condition::Eq(column, value) if value.is_null() => {
                    qb.push(*column).push(" IS NULL");
                }
                Condition::Eq(column, value) => {
                    qb.push(*column).push(" = ");
                    value.push_bind(qb);
                }
                Condition::Contains(column, needle) => {
                    qb.push("LOWER(").push(*column).push(") LIKE ");
                    qb.push_bind(like_pattern(needle));
                }
            }
        }
    }
}

/// `%needle%`, lower-cased, with LIKE metacharacters escaped.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Options for [`TableAccessor::find`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub order_by: Vec<(&'static str, Direction)>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn order_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.order_by.push((column, direction));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Ordered column/value pairs for inserts and patches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, including to null.
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    /// Set a column only when a value was supplied. Used to build patches.
    pub fn set_some<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

// ---------------------------------------------------------------------------
// SQL generation
// ---------------------------------------------------------------------------

fn select_sql<T: Table>(query: &Query) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", T::COLUMNS, T::NAME));
    query.filter.push_where(&mut qb);

    for (i, (column, direction)) in query.order_by.iter().enumerate() {
        qb.push(if i == 0 { " ORDER BY " } else { ", " });
        qb.push(*column).push(" ").push(direction.as_sql());
    }
    if let Some(limit) = query.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }
    if let Some(offset) = query.offset {
        qb.push(" OFFSET ").push_bind(offset);
    }
    qb
}

fn insert_sql<T: Table>(record: &Record) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("INSERT INTO {}", T::NAME));
    if record.is_empty() {
        qb.push(" DEFAULT VALUES");
    } else {
        qb.push(" (");
        for (i, (column, _)) in record.values.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(*column);
        }
        qb.push(") VALUES (");
        for (i, (_, value)) in record.values.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            value.push_bind(&mut qb);
        }
        qb.push(")");
    }
    qb.push(" RETURNING ").push(T::COLUMNS);
    qb
}

fn update_sql<T: Table>(filter: &Filter, patch: &Record) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", T::NAME));
    for (i, (column, value)) in patch.values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(*column).push(" = ");
        value.push_bind(&mut qb);
    }
    filter.push_where(&mut qb);
    qb
}

fn delete_sql<T: Table>(filter: &Filter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("DELETE FROM {}", T::NAME));
    filter.push_where(&mut qb);
    qb
}

fn count_sql<T: Table>(filter: &Filter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", T::NAME));
    filter.push_where(&mut qb);
    qb
}

// ---------------------------------------------------------------------------
// Accessor
// ---------------------------------------------------------------------------

/// Data-access object for one [`Table`].
///
/// Zero-sized, like the hand-written repositories: every method takes the
/// pool as its first argument.
pub struct TableAccessor<T>(PhantomData<fn() -> T>);

impl<T: Table> TableAccessor<T> {
    /// All rows matching the query's filter, ordered and paged as requested.
    pub async fn find(pool: &PgPool, query: &Query) -> Result<Vec<T>, sqlx::Error> {
        let mut qb = select_sql::<T>(query);
        tracing::debug!(table = T::NAME, sql = qb.sql(), "find");
        qb.build_query_as::<T>().fetch_all(pool).await
    }

    /// Every row in the table, in store order.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<T>, sqlx::Error> {
        Self::find(pool, &Query::new()).await
    }

    /// The first row matching `filter`, if any.
    pub async fn find_one(pool: &PgPool, filter: &Filter) -> Result<Option<T>, sqlx::Error> {
        let query = Query::filter(filter.clone()).limit(1);
        let mut qb = select_sql::<T>(&query);
        qb.build_query_as::<T>().fetch_optional(pool).await
    }

    /// The row whose primary key equals `key`.
    pub async fn find_by_key(
        pool: &PgPool,
        key: impl Into<Value>,
    ) -> Result<Option<T>, sqlx::Error> {
        Self::find_one(pool, &Filter::by_key::<T>(key)).await
    }

    /// Insert a row and return it as stored (defaults and serials filled in).
    pub async fn create(pool: &PgPool, record: &Record) -> Result<T, sqlx::Error> {
        let mut qb = insert_sql::<T>(record);
        tracing::debug!(table = T::NAME, columns = record.len(), "create");
        qb.build_query_as::<T>().fetch_one(pool).await
    }

    /// Apply `patch` to every row matching `filter`; returns the affected-row count.
    ///
    /// An empty patch changes nothing and reports how many rows matched, so
    /// callers can still tell "not found" apart from "nothing to change".
    pub async fn update(pool: &PgPool, filter: &Filter, patch: &Record) -> Result<u64, sqlx::Error> {
        if patch.is_empty() {
            return Self::count(pool, filter).await.map(|n| n as u64);
        }
        let mut qb = update_sql::<T>(filter, patch);
        tracing::debug!(table = T::NAME, sql = qb.sql(), "update");
        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete every row matching `filter`; returns the affected-row count.
    pub async fn delete(pool: &PgPool, filter: &Filter) -> Result<u64, sqlx::Error> {
        let mut qb = delete_sql::<T>(filter);
        tracing::debug!(table = T::NAME, sql = qb.sql(), "delete");
        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Number of rows matching `filter`.
    pub async fn count(pool: &PgPool, filter: &Filter) -> Result<i64, sqlx::Error> {
        let mut qb = count_sql::<T>(filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }
}
