//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait + TransactionTrait`, so it runs on a pooled
//! `DatabaseConnection` (sqlite or postgres) or anything else that can open a
//! transaction. Bulk delete needs the latter.

use std::collections::BTreeSet;

use anyhow::{anyhow, Context};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use crate::contract::model::{DeleteOutcome, Employee, NewEmployee};
use crate::domain::repo::{EmployeesRepository, RepoError};
use crate::infra::storage::entity::{ActiveModel as EmployeeAM, Column, Entity as EmployeeEntity};
use crate::infra::storage::schema;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmEmployeesRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmEmployeesRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    async fn find_by_nirc(&self, nirc: &str) -> anyhow::Result<Option<Employee>> {
        let found = EmployeeEntity::find()
            .filter(Column::Nirc.eq(nirc))
            .one(&self.conn)
            .await
            .context("find_by_nirc failed")?;
        Ok(found.map(Into::into))
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Ids from `ids` that currently exist, row-locked (`FOR UPDATE`) where the backend supports it.
async fn existing_ids<D: ConnectionTrait>(db: &D, ids: &[i32]) -> Result<BTreeSet<i32>, DbErr> {
    let rows = EmployeeEntity::find()
        .select_only()
        .column(Column::Id)
        .filter(Column::Id.is_in(ids.iter().copied()))
        .lock_exclusive()
        .into_tuple::<i32>()
        .all(db)
        .await?;
    Ok(rows.into_iter().collect())
}

fn absent_from(ids: &[i32], existing: &BTreeSet<i32>) -> Vec<i32> {
    let mut seen = BTreeSet::new();
    ids.iter()
        .copied()
        .filter(|id| !existing.contains(id) && seen.insert(*id))
        .collect()
}

#[async_trait::async_trait]
impl<C> EmployeesRepository for SeaOrmEmployeesRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        schema::ensure_employees_table(&self.conn)
            .await
            .context("ensure_schema failed")?;
        Ok(())
    }

    async fn insert(&self, e: NewEmployee) -> Result<Employee, RepoError> {
        let nirc = e.nirc.clone();
        let m = EmployeeAM {
            id: NotSet,
            nirc: Set(e.nirc),
            full_name: Set(e.full_name),
            position: Set(e.position.unwrap_or_default()),
            email: Set(e.email),
            // Assigned by the column default so every row shares the store's clock.
            created_at: NotSet,
        };

        let res = match EmployeeEntity::insert(m).exec(&self.conn).await {
            Ok(res) => res,
            Err(err) if is_unique_violation(&err) => return Err(RepoError::DuplicateKey(nirc)),
            Err(err) => return Err(anyhow!(err).context("insert failed").into()),
        };

        let by_id = EmployeeEntity::find_by_id(res.last_insert_id)
            .one(&self.conn)
            .await
            .context("reload by id failed")?;
        if let Some(found) = by_id {
            return Ok(found.into());
        }

        // Fall back to the natural key when the reported id does not resolve.
        self.find_by_nirc(&nirc)
            .await?
            .ok_or_else(|| anyhow!("inserted employee '{nirc}' could not be reloaded").into())
    }

    async fn list(&self) -> Result<Vec<Employee>, RepoError> {
        let rows = EmployeeEntity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.conn)
            .await
            .context("list failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_many(&self, ids: &[i32]) -> Result<DeleteOutcome, RepoError> {
        let wanted: BTreeSet<i32> = ids.iter().copied().collect();
        let txn = self.conn.begin().await.context("begin failed")?;

        let existing = existing_ids(&txn, ids)
            .await
            .context("existence check failed")?;
        let missing = absent_from(ids, &existing);
        if !missing.is_empty() {
            txn.rollback().await.context("rollback failed")?;
            return Ok(DeleteOutcome::Missing(missing));
        }

        let res = EmployeeEntity::delete_many()
            .filter(Column::Id.is_in(wanted.iter().copied()))
            .exec(&txn)
            .await
            .context("delete failed")?;

        // A concurrent delete can remove rows between the check and the delete
        // on backends without row locks; the batch is then all-or-nothing again.
        if res.rows_affected != wanted.len() as u64 {
            txn.rollback().await.context("rollback failed")?;
            tracing::warn!(
                requested = wanted.len(),
                affected = res.rows_affected,
                "bulk delete raced with another writer; rolled back"
            );

            let still_there = existing_ids(&self.conn, ids)
                .await
                .context("recheck after partial delete failed")?;
            let gone = absent_from(ids, &still_there);
            if gone.is_empty() {
                return Err(anyhow!(
                    "delete affected {} of {} rows",
                    res.rows_affected,
                    wanted.len()
                )
                .into());
            }
            return Ok(DeleteOutcome::Missing(gone));
        }

        txn.commit().await.context("commit failed")?;
        Ok(DeleteOutcome::Deleted(res.rows_affected))
    }
}
