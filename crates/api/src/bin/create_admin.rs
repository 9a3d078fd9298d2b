//! One-shot CLI to seed an admin account.
//!
//! ```text
//! DATABASE_URL=postgres://... create-admin <email> <password> [role]
//! ```
//!
//! `role` defaults to ADMIN; pass EDITOR to create an editor instead.

use std::process::ExitCode;

use vitrine_api::auth::password::{hash_password, validate_password_strength};
use vitrine_db::models::user::{CreateUser, UserRole};
use vitrine_db::repositories::UserRepo;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let (email, password) = match (args.next(), args.next()) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            eprintln!("Usage: create-admin <email> <password> [ADMIN|EDITOR]");
            return ExitCode::FAILURE;
        }
    };
    let role = match args.next().as_deref() {
        None | Some("ADMIN") => UserRole::Admin,
        Some("EDITOR") => UserRole::Editor,
        Some(other) => {
            eprintln!("Unknown role '{other}', expected ADMIN or EDITOR");
            return ExitCode::FAILURE;
        }
    };

    if let Err(msg) = validate_password_strength(&password) {
        eprintln!("Rejected password: {msg}");
        return ExitCode::FAILURE;
    }

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL must be set");
            return ExitCode::FAILURE;
        }
    };

    let pool = match vitrine_db::create_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = vitrine_db::run_migrations(&pool).await {
        eprintln!("Failed to run migrations: {e}");
        return ExitCode::FAILURE;
    }

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            eprintln!("Failed to hash password: {e}");
            return ExitCode::FAILURE;
        }
    };

    match UserRepo::create(
        &pool,
        &CreateUser {
            email: email.trim().to_lowercase(),
            password_hash,
            role,
        },
    )
    .await
    {
        Ok(user) => {
            println!("Created {} user {} (id {})", user.role.as_str(), user.email, user.id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to create user: {e}");
            ExitCode::FAILURE
        }
    }
}
