use crate::constants::{PASSWORD_MAX, PASSWORD_MIN, USERNAME_MAX, USERNAME_MIN};
use crate::errors::ApiError;
use crate::repositories::UserStore;
use crate::services::password;

/// Canonical form used everywhere a username is compared or stored.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn validate_new_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Invalid Username and Password"));
    }
    let name_len = username.chars().count();
    if name_len < USERNAME_MIN || name_len > USERNAME_MAX {
        return Err(ApiError::validation(
            "Username must be between 2 and 4 characters",
        ));
    }
    let pass_len = password.chars().count();
    if pass_len < PASSWORD_MIN || pass_len > PASSWORD_MAX {
        return Err(ApiError::validation(
            "Password must be between 6 and 20 characters",
        ));
    }
    Ok(())
}

/// Registers a new account. The stored credential is the argon2 hash only;
/// the plaintext never reaches the store or the log.
pub async fn register(users: &dyn UserStore, username: &str, password: &str) -> Result<String, ApiError> {
    let username = normalize_username(username);
    let password = password.trim();

    validate_new_credentials(&username, password)?;

    if users.find_by_username(&username).await?.is_some() {
        return Err(ApiError::Conflict);
    }

    let password_hash = password::hash(password).map_err(|err| {
        log::error!("password hashing failed: {}", err);
        ApiError::Internal
    })?;

    // A racing registration may have won between the check and the insert;
    // the store keeps whichever credential landed first, and a different
    // surviving hash tells us it was not ours.
    let user = users.create_if_absent(&username, &password_hash).await?;
    if user.password_hash != password_hash {
        return Err(ApiError::Conflict);
    }

    log::info!("{} registered", username);
    Ok(username)
}

/// Verifies credentials. Unknown username and wrong password are
/// indistinguishable to the caller so the endpoint cannot be used to
/// enumerate accounts.
pub async fn login(users: &dyn UserStore, username: &str, password: &str) -> Result<String, ApiError> {
    let username = normalize_username(username);
    let password = password.trim();

    if username.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Invalid Username and Password"));
    }

    let user = users
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !password::verify(password, &user.password_hash) {
        return Err(ApiError::Unauthorized);
    }

    log::info!("user {} logged in successfully", username);
    Ok(username)
}
