pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::PublicUser;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(length(min = 1, message = "Email and password required"))]
    pub email: String,
    /// User's password.
    #[validate(length(min = 1, message = "Email and password required"))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account. Uniqueness is case-insensitive.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password for the new account. Stored only as a bcrypt hash.
    #[validate(length(min = 1, message = "Email and password required"))]
    pub password: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// Response structure after successful authentication (login or registration).
/// Contains the JWT access token and the public fields of the user.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
    /// The authenticated user's public fields (id, email, name).
    pub user: PublicUser,
}
