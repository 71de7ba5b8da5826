use sqlx::{postgres::{PgArguments, PgRow}, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::filter::{PlaceFilter, SqlParam, SqlResult};

/// Runs a [`PlaceFilter`] against a table and maps rows into `T`.
pub struct QueryBuilder<T> {
    table_name: &'static str,
    filter: PlaceFilter,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str) -> Self {
        Self {
            table_name,
            filter: PlaceFilter::default(),
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn filter(mut self, filter: PlaceFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sql_result(&self) -> SqlResult {
        self.filter.to_sql(self.table_name)
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql_result = self.sql_result();
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(query = %sql_result.query, params = sql_result.params.len(), "select");
        }
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::Uuid(u) => q.bind(*u),
    }
}
