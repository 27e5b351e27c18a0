//! Account commands against the configured identity service.

use clap::Subcommand;
use momentum_core::auth::{session_store, IdentityService, RemoteIdentity};
use momentum_core::storage::Config;
use momentum_core::AuthError;

use super::CliResult;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account
    Signup {
        /// Email address
        email: String,
        /// Password
        password: String,
    },
    /// Sign in
    Login {
        /// Email address
        email: String,
        /// Password
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
}

pub fn run(action: AuthAction) -> CliResult {
    let config = Config::load_or_default();

    match action {
        AuthAction::Signup { email, password } => {
            let client = RemoteIdentity::from_config(&config.auth)?;
            let session = client.sign_up(&email, &password)?;
            session_store::save(&session)?;
            println!(
                "Account created; signed in as {}",
                session.user.email.as_deref().unwrap_or(&session.user.id)
            );
        }
        AuthAction::Login { email, password } => {
            let client = RemoteIdentity::from_config(&config.auth)?;
            let session = client.sign_in(&email, &password)?;
            session_store::save(&session)?;
            println!(
                "Signed in as {}",
                session.user.email.as_deref().unwrap_or(&session.user.id)
            );
        }
        AuthAction::Logout => {
            match session_store::load()? {
                Some(session) => {
                    // Best effort on the service side; the local session is
                    // cleared regardless.
                    if let Ok(client) = RemoteIdentity::from_config(&config.auth) {
                        let _ = client.sign_out(&session.access_token);
                    }
                    session_store::clear()?;
                    println!("Signed out");
                }
                None => println!("Not signed in"),
            }
        }
        AuthAction::Whoami => {
            let client = RemoteIdentity::from_config(&config.auth)?;
            let session = session_store::load()?.ok_or(AuthError::NotAuthenticated)?;
            let user = client.current_user(&session.access_token)?;
            println!("{} ({})", user.email.as_deref().unwrap_or("-"), user.id);
        }
    }
    Ok(())
}
