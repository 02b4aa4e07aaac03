use std::sync::Arc;

use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use adk_core::api::{Api, ListApiRequest};
use adk_core::clock::{Clock, SystemClock};
use adk_core::id::{IdSource, UlidIdSource};
use adk_core::Error;
use adk_sql::{decode_api, ApiQueries, RowRead, SqlValue};

use crate::error::Result;

#[derive(Clone)]
pub struct ApiStore {
    pool: PgPool,
    queries: Arc<ApiQueries>,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

impl ApiStore {
    pub async fn connect(db_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_url)
            .await?;

        Self::new(pool, Arc::new(UlidIdSource), Arc::new(SystemClock)).await
    }

    pub async fn new(
        pool: PgPool,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let store = Self {
            pool,
            queries: Arc::new(ApiQueries::new()),
            ids,
            clock,
        };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> anyhow::Result<()> {
        let table = self.queries.table();

        sqlx::query(&table.create_table_ddl())
            .execute(&self.pool)
            .await?;

        for ddl in table.index_table_ddl() {
            sqlx::query(&ddl).execute(&self.pool).await?;
        }

        tracing::info!("table {} ready", table.name());
        Ok(())
    }

    pub async fn create(&self, mut apis: Vec<Api>) -> Result<Vec<String>> {
        let (statement, values) =
            self.queries
                .upsert(&mut apis, self.ids.as_ref(), self.clock.as_ref())?;

        bind_values(sqlx::query(&statement), values)
            .execute(&self.pool)
            .await?;

        Ok(apis.into_iter().map(|api| api.id).collect())
    }

    pub async fn update(&self, mut apis: Vec<Api>) -> Result<()> {
        let (statement, values) =
            self.queries
                .upsert(&mut apis, self.ids.as_ref(), self.clock.as_ref())?;

        bind_values(sqlx::query(&statement), values)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self, req: &ListApiRequest) -> Result<i64> {
        let req = ListApiRequest {
            header: true,
            ..req.clone()
        };
        let (statement, values) = self.queries.list(&req);

        let row = bind_values(sqlx::query(&statement), values)
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.try_get(0)?;

        if total == 0 {
            return Err(Error::not_found("no apis matched").into());
        }
        Ok(total)
    }

    pub async fn list(&self, req: &ListApiRequest) -> Result<Vec<Api>> {
        let req = ListApiRequest {
            header: false,
            ..req.clone()
        };
        let (statement, values) = self.queries.list(&req);

        let rows = bind_values(sqlx::query(&statement), values)
            .fetch_all(&self.pool)
            .await?;

        decode_rows(rows, "no apis matched")
    }

    pub async fn get(&self, ids: &[String]) -> Result<Vec<Api>> {
        let (statement, values) = self.queries.get(ids);

        let rows = bind_values(sqlx::query(&statement), values)
            .fetch_all(&self.pool)
            .await?;

        decode_rows(rows, "no apis for given ids")
    }

    pub async fn delete(&self, ids: &[String]) -> Result<()> {
        let (statement, values) = self.queries.delete(ids);

        bind_values(sqlx::query(&statement), values)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn decode_rows(rows: Vec<PgRow>, empty_message: &str) -> Result<Vec<Api>> {
    if rows.is_empty() {
        return Err(Error::not_found(empty_message).into());
    }

    let mut apis = Vec::with_capacity(rows.len());
    for row in &rows {
        apis.push(decode_api(&PgRowReader(row))?);
    }
    Ok(apis)
}

fn bind_values(
    mut query: Query<'_, Postgres, PgArguments>,
    values: Vec<SqlValue>,
) -> Query<'_, Postgres, PgArguments> {
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::OptText(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Bigint(v) => query.bind(v),
            SqlValue::TextArray(v) => query.bind(v),
        };
    }
    query
}

struct PgRowReader<'a>(&'a PgRow);

impl RowRead for PgRowReader<'_> {
    fn text(&self, column: &str) -> Option<String> {
        self.0.try_get::<Option<String>, _>(column).ok().flatten()
    }

    fn int32(&self, column: &str) -> Option<i32> {
        self.0.try_get::<Option<i32>, _>(column).ok().flatten()
    }

    fn int64(&self, column: &str) -> Option<i64> {
        self.0.try_get::<Option<i64>, _>(column).ok().flatten()
    }
}
