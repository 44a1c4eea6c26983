use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::{AuthClaims, UserId};
use crate::security::jwt;
use crate::services::{LeaderboardService, ScoreUpdate};
use crate::validators;

/// Public leaderboard row: rank and display fields only, no email.
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub full_name: String,
    pub score: i64,
    pub rank: i64,
}

/// Admin view: the full record plus its current rank.
#[derive(Debug, Serialize)]
pub struct AdminStudentEntry {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub score: i64,
    pub rank: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StudentProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateScoreRequest {
    /// Kept as a raw JSON value so non-integer input can be rejected with a
    /// score-specific error instead of a generic deserialization failure.
    pub score: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct UpdateScoreResponse {
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_score: Option<i64>,
    pub score: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteStudentResponse {
    pub success: bool,
}

/// GET /api/v1/students
///
/// Ranked list for the leaderboard screen. Public, computed per request.
pub async fn list_leaderboard(service: web::Data<LeaderboardService>) -> Result<HttpResponse> {
    let ranked = service.list_ranked().await?;

    let entries: Vec<LeaderboardEntry> = ranked
        .into_iter()
        .map(|r| LeaderboardEntry {
            id: r.student.id,
            full_name: r.student.full_name,
            score: r.student.score,
            rank: r.rank,
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/v1/admin/students
///
/// Full record list for the admin dashboard.
pub async fn list_students_admin(
    service: web::Data<LeaderboardService>,
    claims: AuthClaims,
) -> Result<HttpResponse> {
    require_admin(&claims)?;

    let ranked = service.list_ranked().await?;

    let entries: Vec<AdminStudentEntry> = ranked
        .into_iter()
        .map(|r| AdminStudentEntry {
            id: r.student.id,
            full_name: r.student.full_name,
            email: r.student.email,
            score: r.student.score,
            rank: r.rank,
            created_at: r.student.created_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/v1/students/me
pub async fn get_my_profile(
    service: web::Data<LeaderboardService>,
    user: UserId,
) -> Result<HttpResponse> {
    let student = service.get_student(user.0).await?;

    Ok(HttpResponse::Ok().json(StudentProfile {
        id: student.id,
        full_name: student.full_name,
        email: student.email,
        score: student.score,
        created_at: student.created_at,
    }))
}

/// PUT /api/v1/students/{id}/score
pub async fn update_score(
    service: web::Data<LeaderboardService>,
    claims: AuthClaims,
    path: web::Path<String>,
    req: web::Json<UpdateScoreRequest>,
) -> Result<HttpResponse> {
    require_admin(&claims)?;

    let id = parse_identifier(&path.into_inner())?;
    let new_score = validators::parse_score(&req.score)?;

    let response = match service.update_score(id, new_score).await? {
        ScoreUpdate::Updated { previous, new } => {
            tracing::info!(student_id = %id, previous, new, "score updated");
            UpdateScoreResponse {
                updated: true,
                previous_score: Some(previous),
                score: new,
            }
        }
        ScoreUpdate::NoChange { current } => UpdateScoreResponse {
            updated: false,
            previous_score: None,
            score: current,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/v1/students/{id}
pub async fn delete_student(
    service: web::Data<LeaderboardService>,
    claims: AuthClaims,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    require_admin(&claims)?;

    let id = parse_identifier(&path.into_inner())?;
    service.delete_student(id).await?;

    tracing::info!(student_id = %id, "student deleted");

    Ok(HttpResponse::Ok().json(DeleteStudentResponse { success: true }))
}

/// Admin gate, applied at the transport layer before any core dispatch.
fn require_admin(claims: &AuthClaims) -> Result<()> {
    if !jwt::is_admin(&claims.0) {
        return Err(AppError::Authorization("administrator role required".into()));
    }
    Ok(())
}

/// Shape-check the raw identifier before touching the store, then parse it.
fn parse_identifier(raw: &str) -> Result<Uuid> {
    if !validators::is_valid_identifier(raw) {
        return Err(AppError::InvalidIdentifier(format!(
            "malformed student id: {raw}"
        )));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidIdentifier(format!("malformed student id: {raw}")))
}
