//! Login and logout flows over an [`AuthGateway`] and a settings store

use crate::shared::gateway::{AuthGateway, RemoteError};
use crate::shared::settings::{KeyValueStore, SettingsStore};
use contracts::system::auth::{LoginRequest, RememberedCredentials};

pub const MISSING_FIELDS: &str =
    "Παρακαλώ εισάγετε το όνομα χρήστη και τον κωδικό πρόσβασής σας.";
pub const BAD_CREDENTIALS: &str = "Λάθος όνομα χρήστη ή κωδικός πρόσβασης.";
pub const SERVER_UNREACHABLE: &str = "Σφάλμα διακομιστή. Παρακαλώ προσπαθήστε ξανά αργότερα.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginError {
    #[error("{}", MISSING_FIELDS)]
    MissingFields,
    #[error("{0}")]
    Rejected(String),
    #[error("{}", SERVER_UNREACHABLE)]
    Unreachable,
}

impl LoginError {
    fn from_remote(err: RemoteError) -> Self {
        match err {
            RemoteError::Network(_) => LoginError::Unreachable,
            other => LoginError::Rejected(other.detail().unwrap_or_else(|| BAD_CREDENTIALS.to_string())),
        }
    }
}

/// Authenticate and persist the outcome.
///
/// With `remember` the credentials are stored for the next visit, otherwise
/// any stored ones are dropped. Nothing is persisted on failure.
pub async fn login_flow<G, S>(
    gateway: &G,
    settings: &SettingsStore<S>,
    request: LoginRequest,
    remember: bool,
) -> Result<(), LoginError>
where
    G: AuthGateway,
    S: KeyValueStore,
{
    if !request.is_complete() {
        return Err(LoginError::MissingFields);
    }

    gateway.login(&request).await.map_err(|e| {
        log::info!("login failed for {}: {}", request.username, e);
        LoginError::from_remote(e)
    })?;

    let mut current = settings.load();
    current.logged_in = true;
    current.remembered = remember.then(|| RememberedCredentials {
        username: request.username.clone(),
        password: request.password.clone(),
    });
    settings.save(&current);
    log::info!("logged in as {}", request.username);
    Ok(())
}

/// Drop the login flag. Remembered credentials stay.
pub fn logout_flow<S: KeyValueStore>(settings: &SettingsStore<S>) {
    let mut current = settings.load();
    current.logged_in = false;
    settings.save(&current);
    log::info!("logged out");
}
