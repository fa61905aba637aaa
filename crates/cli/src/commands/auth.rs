//! Login command.

use secrecy::ExposeSecret;
use shopfront_client::ClientConfig;

use super::CommandError;
use crate::output::{self, Format};

/// Log in and print the authenticated user.
///
/// Associates the user with Sentry so later errors in this run carry them.
pub async fn login(
    config: &ClientConfig,
    username: &str,
    password: &str,
    show_token: bool,
    format: Format,
) -> Result<(), CommandError> {
    let client = super::client(config)?;
    let session = client.login(username, password).await?;

    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: session.user().id.map(|id| id.to_string()),
            username: Some(session.user().username.clone()),
            email: session.user().email.clone(),
            ..Default::default()
        }));
    });

    if session.is_demo() {
        tracing::info!("Signed in with the demo administrator account");
    }

    let token = show_token.then(|| session.token().expose_secret());
    output::user(format, session.user(), token)?;
    Ok(())
}
