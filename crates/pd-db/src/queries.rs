use sqlx::MySqlPool;
use tracing::debug;

use crate::models::UserRow;
use crate::pool::DbError;

/// Fetch every row of the `users` table.
pub async fn list_users(pool: &MySqlPool) -> Result<Vec<UserRow>, DbError> {
    let users = sqlx::query_as::<_, UserRow>(
        "SELECT name, email, phone, ssn, password, ip, last_login, user_agent FROM users",
    )
    .fetch_all(pool)
    .await?;

    debug!(count = users.len(), "Fetched user rows");
    Ok(users)
}
