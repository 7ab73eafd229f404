use crate::{
    auth::{generate_token, hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest},
    config::AuthConfig,
    error::AppError,
    models::{PublicUser, User},
};
use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns an authentication token alongside
/// the user's public fields. Emails are stored lowercased so uniqueness is
/// case-insensitive.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    auth_config: web::Data<AuthConfig>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    let email = register_data.email.trim().to_lowercase();

    // Check if email already exists
    let existing_user = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&**pool)
        .await?;

    if existing_user.is_some() {
        return Err(AppError::BadRequest("Email already in use".into()));
    }

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user. The UNIQUE constraint on email backstops the lookup
    // above against concurrent registrations.
    let now = Utc::now();
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password_hash, name, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $5)
         RETURNING id, email, password_hash, name, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(&password_hash)
    .bind(&register_data.name)
    .bind(now)
    .fetch_one(&**pool)
    .await?;

    // Generate token
    let token = generate_token(&auth_config, user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// Login user
///
/// Authenticates a user and returns an authentication token. Unknown email
/// and wrong password produce the identical generic response so the endpoint
/// does not leak which accounts exist.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    auth_config: web::Data<AuthConfig>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let email = login_data.email.trim().to_lowercase();

    // Get user from database
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, name, created_at, updated_at
         FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) => {
            // Verify password
            if verify_password(&login_data.password, &user.password_hash)? {
                let token = generate_token(&auth_config, user.id)?;
                Ok(HttpResponse::Ok().json(AuthResponse {
                    token,
                    user: PublicUser::from(&user),
                }))
            } else {
                Err(AppError::BadRequest("Invalid credentials".into()))
            }
        }
        None => Err(AppError::BadRequest("Invalid credentials".into())),
    }
}
