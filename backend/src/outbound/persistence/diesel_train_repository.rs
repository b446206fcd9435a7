//! PostgreSQL-backed `TrainRepository` implementation using Diesel ORM.
//!
//! Route search uses the `(source, destination)` index rather than a scan.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TrainRepository, TrainRepositoryError};
use crate::domain::{NewTrain, Train, TrainId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTrainRow, TrainRow};
use super::pool::{DbPool, PoolError};
use super::schema::trains;

/// Diesel-backed implementation of the train repository port.
#[derive(Clone)]
pub struct DieselTrainRepository {
    pool: DbPool,
}

impl DieselTrainRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TrainRepositoryError {
    map_basic_pool_error(error, TrainRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TrainRepositoryError {
    map_basic_diesel_error(
        error,
        TrainRepositoryError::query,
        TrainRepositoryError::connection,
    )
}

fn row_to_train(row: TrainRow) -> Result<Train, TrainRepositoryError> {
    let TrainRow {
        train_id,
        name,
        source,
        destination,
        departure_time,
        price,
    } = row;
    let id = TrainId::new(train_id)
        .map_err(|err| TrainRepositoryError::query(format!("stored train id invalid: {err}")))?;
    Ok(Train::from_new(
        id,
        NewTrain {
            name,
            source,
            destination,
            time: departure_time,
            price,
        },
    ))
}

fn to_row(train: &Train) -> NewTrainRow<'_> {
    NewTrainRow {
        train_id: train.id().as_str(),
        name: train.name(),
        source: train.source(),
        destination: train.destination(),
        departure_time: train.time(),
        price: train.price(),
    }
}

fn rows_to_trains(rows: Vec<TrainRow>) -> Result<Vec<Train>, TrainRepositoryError> {
    rows.into_iter().map(row_to_train).collect()
}

#[async_trait]
impl TrainRepository for DieselTrainRepository {
    async fn find_by_id(&self, id: &TrainId) -> Result<Option<Train>, TrainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TrainRow> = trains::table
            .filter(trains::train_id.eq(id.as_str()))
            .select(TrainRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_train).transpose()
    }

    async fn upsert(&self, train: &Train) -> Result<(), TrainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(trains::table)
            .values(&to_row(train))
            .on_conflict(trains::train_id)
            .do_update()
            .set((
                trains::name.eq(excluded(trains::name)),
                trains::source.eq(excluded(trains::source)),
                trains::destination.eq(excluded(trains::destination)),
                trains::departure_time.eq(excluded(trains::departure_time)),
                trains::price.eq(excluded(trains::price)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Train>, TrainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TrainRow> = trains::table
            .select(TrainRow::as_select())
            .order(trains::train_id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_trains(rows)
    }

    async fn find_by_route(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<Train>, TrainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TrainRow> = trains::table
            .filter(trains::source.eq(source))
            .filter(trains::destination.eq(destination))
            .select(TrainRow::as_select())
            .order(trains::train_id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_trains(rows)
    }
}
