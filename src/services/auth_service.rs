use bcrypt::verify;
use diesel::prelude::*;

use crate::{
    db::models::{CurrentUser, LoginRequest, LoginResponse},
    db::repositories::UsersRepo,
    error::AppError,
    middleware::auth::JwtService,
    validation::auth::validate_login_request,
};

pub struct AuthService;

impl AuthService {
    pub fn login(
        conn: &mut PgConnection,
        jwt: &JwtService,
        req: &LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        validate_login_request(&req.email, &req.password)?;

        let user = UsersRepo::find_active_by_email(conn, req.email.trim())?
            .ok_or_else(|| AppError::auth("Invalid email or password"))?;

        // Accounts provisioned without a password cannot sign in.
        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::auth("Invalid email or password"))?;

        if !verify(&req.password, hash)? {
            tracing::info!(user_id = %user.id, "Rejected login with a wrong password");
            return Err(AppError::auth("Invalid email or password"));
        }

        let access_token = jwt.generate_access_token(&user)?;
        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.expires_in(),
            user: CurrentUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role: user.role,
                token_id: String::new(),
            },
        })
    }
}
