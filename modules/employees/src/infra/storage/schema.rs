//! `CREATE TABLE IF NOT EXISTS` for the employees table.
//!
//! The id column is `AUTOINCREMENT` on sqlite and `SERIAL` on postgres, so ids
//! are never reused after a delete.

use sea_orm::sea_query::{ColumnDef, Expr, Table, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbErr};

use super::entity::{Column, Entity};

pub fn create_employees_table() -> TableCreateStatement {
    Table::create()
        .table(Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(Column::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Column::Nirc).string_len(20).not_null().unique_key())
        .col(ColumnDef::new(Column::FullName).string().not_null())
        .col(ColumnDef::new(Column::Position).string().not_null().default(""))
        .col(ColumnDef::new(Column::Email).string().null())
        .col(
            ColumnDef::new(Column::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

pub async fn ensure_employees_table<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let backend = conn.get_database_backend();
    conn.execute(backend.build(&create_employees_table())).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbBackend;

    #[test]
    fn sqlite_ddl_is_idempotent_and_autoincrementing() {
        let sql = DbBackend::Sqlite.build(&create_employees_table()).to_string();
        assert!(sql.contains("IF NOT EXISTS"), "{sql}");
        assert!(sql.contains("AUTOINCREMENT"), "{sql}");
        assert!(sql.contains("UNIQUE"), "{sql}");
    }

    #[test]
    fn postgres_ddl_uses_serial() {
        let sql = DbBackend::Postgres.build(&create_employees_table()).to_string();
        assert!(sql.contains("serial"), "{sql}");
        assert!(sql.contains("CURRENT_TIMESTAMP"), "{sql}");
    }
}
