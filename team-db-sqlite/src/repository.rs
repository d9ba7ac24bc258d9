use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, sqlite::SqlitePool};
use team_core::{CostInputs, SnapshotStore, StoreError};
use tracing::debug;

use crate::decimal::{decimal_to_text, get_decimal};

/// [`SnapshotStore`] backed by the `cost_snapshots` table.
pub struct SqliteSnapshotStore {
    pool: SqlitePool,
    key: String,
}

impl SqliteSnapshotStore {
    pub fn new_with_pool(
        pool: SqlitePool,
        key: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// When the snapshot last changed, if there is one.
    ///
    /// Saving inputs equal to the stored ones leaves the row untouched.
    pub async fn saved_at(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        let row = sqlx::query("SELECT updated_at FROM cost_snapshots WHERE snapshot_key = ?")
            .bind(&self.key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(|row| {
            row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| StoreError::Database(format!("Failed to get updated_at: {}", e)))
        })
        .transpose()
    }
}

fn row_to_cost_inputs(row: &sqlx::sqlite::SqliteRow) -> Result<CostInputs, StoreError> {
    let players: i64 = row
        .try_get("number_of_players")
        .map_err(|e| StoreError::Database(e.to_string()))?;

    Ok(CostInputs {
        team_name: row
            .try_get("team_name")
            .map_err(|e| StoreError::Database(e.to_string()))?,
        cost_per_hour_of_ice: get_decimal(row, "cost_per_hour_of_ice")?,
        hours: get_decimal(row, "hours")?,
        coach_cost_total: get_decimal(row, "coach_cost_total")?,
        cost_per_jersey: get_decimal(row, "cost_per_jersey")?,
        transaction_fee_percent: get_decimal(row, "transaction_fee_percent")?,
        transaction_fee_fixed_amount: get_decimal(row, "transaction_fee_fixed_amount")?,
        number_of_players: u32::try_from(players).map_err(|_| {
            StoreError::Database(format!("number_of_players out of range: {}", players))
        })?,
    })
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn load(&self) -> Result<Option<CostInputs>, StoreError> {
        let row = sqlx::query(
            "SELECT team_name, cost_per_hour_of_ice, hours, coach_cost_total,
                    cost_per_jersey, transaction_fee_percent,
                    transaction_fee_fixed_amount, number_of_players
             FROM cost_snapshots WHERE snapshot_key = ?",
        )
        .bind(&self.key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(key = %self.key, found = row.is_some(), "loaded snapshot");
        row.as_ref().map(row_to_cost_inputs).transpose()
    }

    async fn save(
        &self,
        inputs: &CostInputs,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO cost_snapshots (
                snapshot_key, team_name, cost_per_hour_of_ice, hours, coach_cost_total,
                cost_per_jersey, transaction_fee_percent, transaction_fee_fixed_amount,
                number_of_players, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(snapshot_key) DO UPDATE SET
                team_name = excluded.team_name,
                cost_per_hour_of_ice = excluded.cost_per_hour_of_ice,
                hours = excluded.hours,
                coach_cost_total = excluded.coach_cost_total,
                cost_per_jersey = excluded.cost_per_jersey,
                transaction_fee_percent = excluded.transaction_fee_percent,
                transaction_fee_fixed_amount = excluded.transaction_fee_fixed_amount,
                number_of_players = excluded.number_of_players,
                updated_at = excluded.updated_at
             WHERE team_name IS NOT excluded.team_name
                OR cost_per_hour_of_ice IS NOT excluded.cost_per_hour_of_ice
                OR hours IS NOT excluded.hours
                OR coach_cost_total IS NOT excluded.coach_cost_total
                OR cost_per_jersey IS NOT excluded.cost_per_jersey
                OR transaction_fee_percent IS NOT excluded.transaction_fee_percent
                OR transaction_fee_fixed_amount IS NOT excluded.transaction_fee_fixed_amount
                OR number_of_players IS NOT excluded.number_of_players",
        )
        .bind(&self.key)
        .bind(&inputs.team_name)
        .bind(decimal_to_text(inputs.cost_per_hour_of_ice))
        .bind(decimal_to_text(inputs.hours))
        .bind(decimal_to_text(inputs.coach_cost_total))
        .bind(decimal_to_text(inputs.cost_per_jersey))
        .bind(decimal_to_text(inputs.transaction_fee_percent))
        .bind(decimal_to_text(inputs.transaction_fee_fixed_amount))
        .bind(i64::from(inputs.number_of_players))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(key = %self.key, "saved snapshot");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM cost_snapshots WHERE snapshot_key = ?")
            .bind(&self.key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(key = %self.key, removed = result.rows_affected(), "cleared snapshot");
        Ok(())
    }
}
