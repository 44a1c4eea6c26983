/// Student repository - handles all database operations for student records
use crate::models::Student;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new student record with an initial score of 0
pub async fn create_student(
    pool: &PgPool,
    full_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Student, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Student>(
        r#"
        INSERT INTO students (id, full_name, email, password_hash, score, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, full_name, email, password_hash, score, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(full_name)
    .bind(email.to_lowercase())
    .bind(password_hash)
    .bind(0i64)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Find a student by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        SELECT id, full_name, email, password_hash, score, created_at, updated_at
        FROM students
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Find a student by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        SELECT id, full_name, email, password_hash, score, created_at, updated_at
        FROM students
        WHERE email = $1
        "#,
    )
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await
}

/// Check if an email is already taken
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(SELECT 1 FROM students WHERE email = $1)
        "#,
    )
    .bind(email.to_lowercase())
    .fetch_one(pool)
    .await
}

/// Fetch all students ordered by score descending.
///
/// No secondary sort key: the order of equal scores is whatever the store
/// yields, and rank assignment downstream is positional.
pub async fn list_by_score_desc(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        SELECT id, full_name, email, password_hash, score, created_at, updated_at
        FROM students
        ORDER BY score DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Overwrite a student's score. Returns None when no row matched the id.
pub async fn update_score(
    pool: &PgPool,
    id: Uuid,
    score: i64,
) -> Result<Option<Student>, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Student>(
        r#"
        UPDATE students
        SET score = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, full_name, email, password_hash, score, created_at, updated_at
        "#,
    )
    .bind(score)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a student by ID. Returns the number of rows removed (0 or 1).
pub async fn delete_by_id(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM students
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
