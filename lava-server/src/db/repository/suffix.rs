//! Suffix Repository

use shared::models::Suffix;
use sqlx::SqlitePool;

use super::RepoResult;

/// All suffixes in catalog order ("None" first)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Suffix>> {
    let suffixes = sqlx::query_as::<_, Suffix>("SELECT id, sfx_name FROM suffixes ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(suffixes)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Suffix>> {
    let suffix = sqlx::query_as::<_, Suffix>("SELECT id, sfx_name FROM suffixes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(suffix)
}
