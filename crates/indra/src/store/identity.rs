use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::records::{AuthUser, UserId};

const MIN_PASSWORD_LEN: usize = 6;

/// Identity collaborator; every repository scopes its queries by the current user.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Option<AuthUser>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthUser, AuthError>;
    /// `None` leaves the corresponding attribute unchanged.
    async fn update_profile(
        &self,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<(), AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("the email address is badly formatted")]
    InvalidEmail,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("the email address is already in use by another account")]
    EmailInUse,
    #[error("the email or password is incorrect")]
    InvalidCredentials,
    #[error("not signed in")]
    NotSignedIn,
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

struct Account {
    password: String,
    user: AuthUser,
}

#[derive(Default)]
struct IdentityState {
    accounts: HashMap<String, Account>,
    session: Option<String>,
}

/// Email/password identity provider kept in process memory, with a single
/// active session.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    state: Mutex<IdentityState>,
}

impl InMemoryIdentityProvider {
    fn lock(&self) -> Result<MutexGuard<'_, IdentityState>, AuthError> {
        self.state
            .lock()
            .map_err(|_| AuthError::Unavailable("identity mutex poisoned".to_string()))
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_ascii_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(AuthError::InvalidEmail)
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_user(&self) -> Option<AuthUser> {
        let state = self.lock().ok()?;
        let email = state.session.as_ref()?;
        state.accounts.get(email).map(|account| account.user.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let email = normalize_email(email)?;
        let mut state = self.lock()?;
        let user = match state.accounts.get(&email) {
            Some(account) if account.password == password => account.user.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        state.session = Some(email);
        Ok(user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthUser, AuthError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let mut state = self.lock()?;
        if state.accounts.contains_key(&email) {
            return Err(AuthError::EmailInUse);
        }

        let user = AuthUser {
            uid: UserId(Uuid::new_v4().simple().to_string()),
            display_name: display_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            photo_url: None,
            email: Some(email.clone()),
        };
        state.accounts.insert(
            email.clone(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        state.session = Some(email);
        Ok(user)
    }

    async fn update_profile(
        &self,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<(), AuthError> {
        let mut state = self.lock()?;
        let email = state.session.clone().ok_or(AuthError::NotSignedIn)?;
        let account = state
            .accounts
            .get_mut(&email)
            .ok_or(AuthError::NotSignedIn)?;
        if let Some(name) = display_name {
            account.user.display_name = Some(name.trim().to_string());
        }
        if let Some(url) = photo_url {
            account.user.photo_url = Some(url.to_string());
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.lock()?.session = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_starts_a_session() {
        let provider = InMemoryIdentityProvider::default();
        let user = provider
            .sign_up("Asha@Example.com", "monsoon", Some("Asha"))
            .await
            .expect("sign up succeeds");

        assert_eq!(user.email.as_deref(), Some("asha@example.com"));
        assert_eq!(provider.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn rejects_weak_passwords_and_bad_emails() {
        let provider = InMemoryIdentityProvider::default();
        assert_eq!(
            provider.sign_up("asha@example.com", "rain", None).await,
            Err(AuthError::WeakPassword)
        );
        assert_eq!(
            provider.sign_up("not-an-email", "monsoon", None).await,
            Err(AuthError::InvalidEmail)
        );
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected() {
        let provider = InMemoryIdentityProvider::default();
        provider
            .sign_up("asha@example.com", "monsoon", None)
            .await
            .expect("first sign up");
        assert_eq!(
            provider.sign_up("ASHA@example.com", "monsoon2", None).await,
            Err(AuthError::EmailInUse)
        );
    }

    #[tokio::test]
    async fn sign_in_checks_password_and_sign_out_clears_session() {
        let provider = InMemoryIdentityProvider::default();
        provider
            .sign_up("asha@example.com", "monsoon", None)
            .await
            .expect("sign up");
        provider.sign_out().await.expect("sign out");
        assert!(provider.current_user().await.is_none());

        assert_eq!(
            provider.sign_in("asha@example.com", "drought").await,
            Err(AuthError::InvalidCredentials)
        );
        let user = provider
            .sign_in("asha@example.com", "monsoon")
            .await
            .expect("sign in");
        assert_eq!(provider.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn update_profile_requires_session() {
        let provider = InMemoryIdentityProvider::default();
        assert_eq!(
            provider.update_profile(Some("Asha"), None).await,
            Err(AuthError::NotSignedIn)
        );

        provider
            .sign_up("asha@example.com", "monsoon", None)
            .await
            .expect("sign up");
        provider
            .update_profile(Some("Asha Verma"), Some("https://example.com/a.png"))
            .await
            .expect("profile updated");
        let user = provider.current_user().await.expect("signed in");
        assert_eq!(user.display_name.as_deref(), Some("Asha Verma"));
        assert_eq!(user.photo_url.as_deref(), Some("https://example.com/a.png"));
    }
}
