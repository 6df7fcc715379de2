use sqlx::{PgConnection, PgPool};

/// Resets a table's id sequence so the next insert starts at 1. Returns false
/// when the table has no serial sequence to reset.
///
/// Uses `ALTER SEQUENCE ... RESTART`, which is transactional: a rolled-back
/// import leaves the sequence untouched, unlike `setval`.
pub(crate) async fn reset(conn: &mut PgConnection, table: &str) -> Result<bool, sqlx::Error> {
    let Some(sequence) = serial_sequence(&mut *conn, table).await? else {
        return Ok(false);
    };

    sqlx::query(&format!("ALTER SEQUENCE {sequence} RESTART WITH 1")).execute(conn).await?;
    Ok(true)
}

/// Rewrites ids to a dense 1..N range ordered by the current ids, then points
/// the sequence past the new maximum. Callers must ensure no other table still
/// references the old ids.
pub(crate) async fn renumber(pool: &PgPool, table: &str) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(&format!(
        "WITH numbered AS (
            SELECT id, ROW_NUMBER() OVER (ORDER BY id) AS rn FROM {table}
        )
        UPDATE {table} t SET id = numbered.rn
        FROM numbered WHERE t.id = numbered.id AND t.id <> numbered.rn",
    ))
    .execute(&mut *tx)
    .await?;

    let max_id: Option<i64> =
        sqlx::query_scalar(&format!("SELECT MAX(id) FROM {table}")).fetch_one(&mut *tx).await?;

    if let Some(sequence) = serial_sequence(&mut *tx, table).await? {
        let restart = max_id.unwrap_or(0).max(0) + 1;
        sqlx::query(&format!("ALTER SEQUENCE {sequence} RESTART WITH {restart}"))
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

async fn serial_sequence(
    conn: &mut PgConnection,
    table: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT pg_get_serial_sequence($1, 'id')")
        .bind(table)
        .fetch_one(conn)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::trainers::{self, CreateTrainer};
    use crate::test_support;

    async fn insert_trainer(pool: &PgPool, skill: &str) {
        trainers::insert(
            pool,
            CreateTrainer {
                skill,
                competency: "Backend",
                trainer_name: "Jordan Smith",
                expertise_level: "L3",
            },
        )
        .await
        .expect("insert trainer");
    }

    #[tokio::test]
    async fn renumber_compacts_ids_and_continues_sequence() {
        let Some(db) = test_support::test_db().await else {
            eprintln!("skipping: no database configured");
            return;
        };

        for skill in ["Rust", "Go", "SQL"] {
            insert_trainer(&db.pool, skill).await;
        }
        sqlx::query("DELETE FROM trainers WHERE id = 2").execute(&db.pool).await.expect("delete");

        renumber(&db.pool, "trainers").await.expect("renumber");

        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM trainers ORDER BY id")
            .fetch_all(&db.pool)
            .await
            .expect("ids");
        assert_eq!(ids, vec![1, 2]);

        insert_trainer(&db.pool, "Kubernetes").await;
        let max: i64 =
            sqlx::query_scalar("SELECT MAX(id) FROM trainers").fetch_one(&db.pool).await.expect("max");
        assert_eq!(max, 3);
    }

    #[tokio::test]
    async fn rolled_back_reset_leaves_sequence_untouched() {
        let Some(db) = test_support::test_db().await else {
            eprintln!("skipping: no database configured");
            return;
        };

        insert_trainer(&db.pool, "Rust").await;
        insert_trainer(&db.pool, "Go").await;

        let mut tx = db.pool.begin().await.expect("begin");
        trainers::delete_all(&mut *tx).await.expect("delete all");
        assert!(reset(&mut tx, "trainers").await.expect("reset"));
        drop(tx);

        let count = trainers::count(&db.pool).await.expect("count");
        assert_eq!(count, 2);

        insert_trainer(&db.pool, "SQL").await;
        let max: i64 =
            sqlx::query_scalar("SELECT MAX(id) FROM trainers").fetch_one(&db.pool).await.expect("max");
        assert_eq!(max, 3);
    }

    #[tokio::test]
    async fn reset_reports_missing_sequence() {
        let Some(db) = test_support::test_db().await else {
            eprintln!("skipping: no database configured");
            return;
        };

        let mut conn = db.pool.acquire().await.expect("conn");
        assert!(!reset(&mut conn, "manager_employee").await.expect("reset"));
    }
}
