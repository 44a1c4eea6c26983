//! Score-ranking and admin-mutation data path.
//!
//! Rank is derived at query time from the score-descending ordering and is
//! never stored or cached. Score mutation distinguishes a real write from a
//! no-op so callers can surface idempotent updates explicitly.

use crate::db::student_repo;
use crate::error::{AppError, Result};
use crate::models::Student;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// A student annotated with its 1-based position in the score-descending
/// ordering. Positional, not dense: equal scores get adjacent distinct ranks.
#[derive(Debug, Clone, Serialize)]
pub struct RankedStudent {
    #[serde(flatten)]
    pub student: Student,
    pub rank: i64,
}

/// Outcome of a score mutation. `NoChange` is not an error: it signals that
/// the requested value already matched the stored one and no write happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreUpdate {
    Updated { previous: i64, new: i64 },
    NoChange { current: i64 },
}

/// Leaderboard operations over an explicit store handle.
#[derive(Clone)]
pub struct LeaderboardService {
    pool: PgPool,
}

impl LeaderboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch every record sorted by score descending and annotate each with
    /// its 1-based rank. Reflects store state at the moment of the query.
    pub async fn list_ranked(&self) -> Result<Vec<RankedStudent>> {
        let students = student_repo::list_by_score_desc(&self.pool).await?;
        Ok(assign_ranks(students))
    }

    /// Single-record lookup for profile reads.
    pub async fn get_student(&self, id: Uuid) -> Result<Student> {
        student_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {id} does not exist")))
    }

    /// Overwrite a student's score.
    ///
    /// Equality against the stored value is decided on the freshly read
    /// record before writing; the store's rows-modified count is never used
    /// to infer "no change". An UPDATE that matches zero rows after the read
    /// means the record was deleted concurrently and surfaces as NotFound.
    /// Concurrent writers race last-write-wins.
    pub async fn update_score(&self, id: Uuid, new_score: i64) -> Result<ScoreUpdate> {
        let student = student_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {id} does not exist")))?;

        if student.score == new_score {
            return Ok(ScoreUpdate::NoChange {
                current: student.score,
            });
        }

        let updated = student_repo::update_score(&self.pool, id, new_score)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {id} does not exist")))?;

        Ok(ScoreUpdate::Updated {
            previous: student.score,
            new: updated.score,
        })
    }

    /// Delete the record matching `id`. Deleting an already-removed record
    /// fails with NotFound rather than succeeding idempotently.
    pub async fn delete_student(&self, id: Uuid) -> Result<()> {
        let removed = student_repo::delete_by_id(&self.pool, id).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!("student {id} does not exist")));
        }
        Ok(())
    }
}

/// Annotate an already score-descending sequence with 1-based ranks.
pub fn assign_ranks(students: Vec<Student>) -> Vec<RankedStudent> {
    students
        .into_iter()
        .enumerate()
        .map(|(index, student)| RankedStudent {
            student,
            rank: index as i64 + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn student(name: &str, score: i64) -> Student {
        let now = Utc::now();
        Student {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "$argon2id$stub".to_string(),
            score,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_assign_ranks_empty() {
        assert!(assign_ranks(Vec::new()).is_empty());
    }

    #[test]
    fn test_ranks_are_a_gapless_permutation() {
        let students = vec![
            student("Dana", 120),
            student("Ben", 90),
            student("Ava", 50),
            student("Cleo", 10),
        ];
        let ranked = assign_ranks(students);

        let ranks: Vec<i64> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(ranked[0].student.full_name, "Dana");
        assert_eq!(ranked[3].student.full_name, "Cleo");
    }

    #[test]
    fn test_equal_scores_get_adjacent_distinct_ranks() {
        // A(50), B(90), C(90): both B and C must rank ahead of A, tie order
        // between B and C is whatever order the store handed us.
        let ranked = assign_ranks(vec![student("B", 90), student("C", 90), student("A", 50)]);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[0].student.score, 90);
        assert_eq!(ranked[1].student.score, 90);
        assert_eq!(ranked[2].student.full_name, "A");
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_ranked_student_serializes_rank_beside_record_fields() {
        let ranked = assign_ranks(vec![student("Ava", 50)]);
        let value = serde_json::to_value(&ranked[0]).expect("serialize");

        assert_eq!(value["rank"], 1);
        assert_eq!(value["full_name"], "Ava");
        assert_eq!(value["score"], 50);
        // password_hash must never leave the service
        assert!(value.get("password_hash").is_none());
    }
}
