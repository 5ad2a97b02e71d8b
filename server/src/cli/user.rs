//! User management CLI subcommands
//!
//! Provides commands for listing, creating, deleting, and deactivating users.

use crate::{accounts, auth::bootstrap, db};
use account_api_common::error::ServiceError;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

/// User management commands
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List all users
    List,
    /// Create a superuser (prompts for the password when --password is omitted)
    CreateSuperuser(CreateSuperuser),
    /// Delete a user and their token
    Delete(UserByEmail),
    /// Deactivate a user so they can no longer authenticate
    Deactivate(UserByEmail),
}

/// Arguments for creating a superuser
#[derive(Parser, Debug)]
pub struct CreateSuperuser {
    /// Email address for the new superuser
    #[arg(short, long)]
    pub email: String,
    /// Password (prompted interactively if omitted)
    #[arg(short, long)]
    pub password: Option<String>,
    /// Display name
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments selecting a user by email
#[derive(Parser, Debug)]
pub struct UserByEmail {
    /// Email address of the user
    pub email: String,
}

/// Execute a user management command against the database.
pub async fn execute(pool: &SqlitePool, command: UserCommand) -> Result<(), ServiceError> {
    match command {
        UserCommand::List => {
            let users = db::users::list(pool).await?;
            if users.is_empty() {
                println!("No users");
                return Ok(());
            }
            println!("{:<36}  {:<32}  {:<6}  {:<5}  {:<9}", "ID", "EMAIL", "ACTIVE", "STAFF", "SUPERUSER");
            for user in users {
                println!(
                    "{:<36}  {:<32}  {:<6}  {:<5}  {:<9}",
                    user.id, user.email, user.is_active, user.is_staff, user.is_superuser
                );
            }
        }
        UserCommand::CreateSuperuser(args) => {
            let user = match args.password {
                Some(password) => {
                    accounts::create_superuser(pool, &args.email, &password, args.name.as_deref())
                        .await?
                }
                None => {
                    bootstrap::create_superuser_interactive(pool, &args.email, args.name.as_deref())
                        .await?
                }
            };
            println!("Superuser created: {}", user.email);
        }
        UserCommand::Delete(args) => {
            let user = require_user(pool, &args.email).await?;
            db::users::delete(pool, user.id).await?;
            println!("User deleted: {}", user.email);
        }
        UserCommand::Deactivate(args) => {
            let user = require_user(pool, &args.email).await?;
            db::users::set_active(pool, user.id, false).await?;
            db::auth_tokens::delete_for_user(pool, user.id).await?;
            println!("User deactivated: {}", user.email);
        }
    }
    Ok(())
}

async fn require_user(
    pool: &SqlitePool,
    email: &str,
) -> Result<account_api_common::auth::User, ServiceError> {
    accounts::find_by_email(pool, email)
        .await?
        .ok_or_else(|| ServiceError::field("email", format!("No user with email {}", email.trim())))
}
