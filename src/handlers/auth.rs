use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::db::student_repo;
use crate::error::{AppError, Result};
use crate::security::jwt::{self, TokenResponse, ROLE_ADMIN, ROLE_USER};
use crate::security::password;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub score: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub full_name: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// POST /api/v1/auth/signup
///
/// Creates the credential record and the score-bearing record in one step;
/// the score always starts at 0.
pub async fn signup(
    pool: web::Data<PgPool>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if student_repo::email_exists(pool.get_ref(), &req.email).await? {
        return Err(AppError::Conflict("email is already registered".into()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let student =
        match student_repo::create_student(pool.get_ref(), &req.full_name, &req.email, &password_hash)
            .await
        {
            Ok(student) => student,
            // Lost the duplicate-email race between the exists check and the insert
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(AppError::Conflict("email is already registered".into()));
            }
            Err(e) => return Err(e.into()),
        };

    tracing::info!(student_id = %student.id, "student signed up");

    Ok(HttpResponse::Created().json(SignupResponse {
        id: student.id,
        full_name: student.full_name,
        email: student.email,
        score: student.score,
    }))
}

/// POST /api/v1/auth/login
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let student = student_repo::find_by_email(pool.get_ref(), &req.email)
        .await?
        .ok_or_else(|| AppError::Authentication("invalid email or password".into()))?;

    if !password::verify_password(&req.password, &student.password_hash)? {
        return Err(AppError::Authentication("invalid email or password".into()));
    }

    let access_token = jwt::generate_access_token(
        student.id,
        &student.email,
        ROLE_USER,
        &config.jwt.secret,
        config.jwt.access_token_ttl,
    )?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        user_id: student.id,
        full_name: student.full_name,
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: config.jwt.access_token_ttl,
    }))
}

/// POST /api/v1/auth/admin/login
///
/// The administrator is configured out-of-band (email + argon2 hash), not a
/// store record; the issued token carries the admin role and a nil subject.
pub async fn admin_login(
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let credentials_match = req.email.eq_ignore_ascii_case(&config.admin.email)
        && password::verify_password(&req.password, &config.admin.password_hash)?;

    if !credentials_match {
        return Err(AppError::Authentication("invalid admin credentials".into()));
    }

    let access_token = jwt::generate_access_token(
        Uuid::nil(),
        &config.admin.email,
        ROLE_ADMIN,
        &config.jwt.secret,
        config.jwt.access_token_ttl,
    )?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: config.jwt.access_token_ttl,
    }))
}
