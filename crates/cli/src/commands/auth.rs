//! Session commands: login, logout, whoami.
//!
//! # Usage
//!
//! ```bash
//! bk-cli login fatima
//! bk-cli whoami
//! bk-cli logout
//! ```

use std::io::Write;

use secrecy::SecretString;

use barakah_client::session::{Session, SessionFile};

use super::{CliError, backend};

/// Log in and persist the session file.
#[allow(clippy::print_stdout)]
pub async fn login(username: &str, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(p) => SecretString::from(p),
        None => prompt_password()?,
    };

    let response = backend()?.login(username, &password).await?;
    let store = SessionFile::from_env()?;
    store.save(&Session::authenticated(response.token, response.user.clone()))?;

    println!(
        "Logged in as {} ({})",
        response.user.username, response.user.role
    );
    Ok(())
}

/// Create an account and persist the session file.
#[allow(clippy::print_stdout)]
pub async fn signup(username: &str, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(p) => SecretString::from(p),
        None => prompt_password()?,
    };

    let response = backend()?.signup(username, &password).await?;
    let store = SessionFile::from_env()?;
    store.save(&Session::authenticated(response.token, response.user.clone()))?;

    println!("Account created: {}", response.user.username);
    Ok(())
}

/// Remove the stored session.
#[allow(clippy::print_stdout)]
pub fn logout() -> Result<(), CliError> {
    SessionFile::from_env()?.clear()?;
    println!("Logged out.");
    Ok(())
}

/// Show the stored user, re-checked against the backend.
#[allow(clippy::print_stdout)]
pub async fn whoami() -> Result<(), CliError> {
    let user = super::authed_backend()?.me().await?;
    println!("{} ({})", user.username, user.role);
    Ok(())
}

fn prompt_password() -> Result<SecretString, CliError> {
    #[allow(clippy::print_stderr)]
    {
        eprint!("Password: ");
        std::io::stderr().flush()?;
    }
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(SecretString::from(line.trim_end().to_owned()))
}
