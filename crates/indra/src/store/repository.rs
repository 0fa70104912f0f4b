use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, warn};

use super::identity::{AuthError, IdentityProvider};
use super::{Document, DocumentStore, StoreError};
use crate::records::{
    OnboardingDetails, Property, PropertyId, PropertyPlacement, Report, ReportId, UserId,
    UserProfile,
};

/// Error enumeration for repository mutations. Reads never fail; they degrade
/// to empty results instead.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("display name cannot be blank")]
    BlankDisplayName,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Collection access bound to whichever user is currently signed in.
struct UserScoped<T: Document> {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore<T>>,
    _records: PhantomData<fn() -> T>,
}

impl<T: Document> UserScoped<T> {
    fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore<T>>) -> Self {
        Self {
            identity,
            store,
            _records: PhantomData,
        }
    }

    async fn owner(&self) -> Option<UserId> {
        self.identity.current_user().await.map(|user| user.uid)
    }

    async fn require_owner(&self) -> Result<UserId, RepositoryError> {
        self.owner().await.ok_or(RepositoryError::NotSignedIn)
    }

    async fn list(&self) -> Vec<T> {
        let Some(owner) = self.owner().await else {
            return Vec::new();
        };
        match self.store.list(&owner).await {
            Ok(documents) => documents,
            Err(err) => {
                warn!(collection = T::COLLECTION, error = %err, "listing documents failed");
                Vec::new()
            }
        }
    }

    async fn get(&self, id: &str) -> Option<T> {
        let owner = self.owner().await?;
        match self.store.get(&owner, id).await {
            Ok(document) => document,
            Err(err) => {
                warn!(collection = T::COLLECTION, id, error = %err, "fetching document failed");
                None
            }
        }
    }

    async fn add(&self, document: T) -> Result<(), RepositoryError> {
        let owner = self.require_owner().await?;
        let id = document.document_id().to_string();
        self.store.add(&owner, document).await?;
        debug!(collection = T::COLLECTION, %id, "document added");
        Ok(())
    }

    async fn update(&self, document: T) -> Result<(), RepositoryError> {
        let owner = self.require_owner().await?;
        self.store.update(&owner, document).await?;
        Ok(())
    }

    /// Adds the document, or replaces it when one with the same id exists.
    async fn upsert(&self, document: T) -> Result<(), RepositoryError> {
        let owner = self.require_owner().await?;
        let existing = self.store.get(&owner, document.document_id()).await?;
        if existing.is_some() {
            self.store.update(&owner, document).await?;
        } else {
            self.store.add(&owner, document).await?;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let owner = self.require_owner().await?;
        self.store.delete(&owner, id).await?;
        debug!(collection = T::COLLECTION, id, "document deleted");
        Ok(())
    }
}

/// Reports owned by the signed-in user. Reports are never edited in place.
pub struct ReportRepository {
    inner: UserScoped<Report>,
}

impl ReportRepository {
    pub fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore<Report>>) -> Self {
        Self {
            inner: UserScoped::new(identity, store),
        }
    }

    pub async fn list(&self) -> Vec<Report> {
        self.inner.list().await
    }

    pub async fn get(&self, id: &ReportId) -> Option<Report> {
        self.inner.get(id.as_str()).await
    }

    pub async fn add(&self, report: &Report) -> Result<(), RepositoryError> {
        self.inner.add(report.clone()).await
    }

    pub async fn delete(&self, id: &ReportId) -> Result<(), RepositoryError> {
        self.inner.delete(id.as_str()).await
    }
}

/// Properties tracked by the signed-in user.
pub struct PropertyRepository {
    inner: UserScoped<Property>,
}

impl PropertyRepository {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore<Property>>,
    ) -> Self {
        Self {
            inner: UserScoped::new(identity, store),
        }
    }

    pub async fn list(&self) -> Vec<Property> {
        self.inner.list().await
    }

    pub async fn get(&self, id: &PropertyId) -> Option<Property> {
        self.inner.get(id.as_str()).await
    }

    pub async fn add(&self, property: &Property) -> Result<(), RepositoryError> {
        self.inner.add(property.clone()).await
    }

    pub async fn update(&self, property: &Property) -> Result<(), RepositoryError> {
        self.inner.update(property.clone()).await
    }

    pub async fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        self.inner.delete(id.as_str()).await
    }

    /// Starts tracking the property described by `report`.
    pub async fn promote(
        &self,
        report: &Report,
        placement: PropertyPlacement,
    ) -> Result<Property, RepositoryError> {
        let property = Property::from_report(report, placement);
        self.inner.add(property.clone()).await?;
        Ok(property)
    }

    /// Applies a newer report to an already tracked property.
    pub async fn reassess(
        &self,
        id: &PropertyId,
        report: &Report,
    ) -> Result<Property, RepositoryError> {
        let owner = self.inner.require_owner().await?;
        let mut property = self
            .inner
            .store
            .get(&owner, id.as_str())
            .await?
            .ok_or(StoreError::NotFound)?;
        property.apply_report(report);
        self.inner.store.update(&owner, property.clone()).await?;
        Ok(property)
    }
}

/// Onboarding and display-name state for the signed-in user.
pub struct ProfileRepository {
    inner: UserScoped<UserProfile>,
}

impl ProfileRepository {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore<UserProfile>>,
    ) -> Self {
        Self {
            inner: UserScoped::new(identity, store),
        }
    }

    pub async fn load(&self) -> Option<UserProfile> {
        let owner = self.inner.owner().await?;
        self.inner.get(owner.as_str()).await
    }

    /// True unless the signed-in user has finished onboarding.
    pub async fn needs_onboarding(&self) -> bool {
        !matches!(self.load().await, Some(profile) if profile.onboarding_completed)
    }

    /// Values the onboarding form starts from.
    pub async fn onboarding_prefill(&self) -> (String, OnboardingDetails) {
        if let Some(profile) = self.load().await {
            return (
                profile.preferred_name().to_string(),
                profile.onboarding_details(),
            );
        }
        let name = self
            .inner
            .identity
            .current_user()
            .await
            .and_then(|user| user.display_name)
            .unwrap_or_default();
        (name, OnboardingDetails::default())
    }

    pub async fn complete_onboarding(
        &self,
        name: &str,
        details: OnboardingDetails,
    ) -> Result<UserProfile, RepositoryError> {
        let mut profile = self.current_or_new().await?;
        profile.complete_onboarding(name, details);
        self.inner.upsert(profile.clone()).await?;
        Ok(profile)
    }

    /// Renames the user with the identity provider and in the stored profile.
    pub async fn rename(&self, display_name: &str) -> Result<UserProfile, RepositoryError> {
        let mut profile = self.current_or_new().await?;
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(RepositoryError::BlankDisplayName);
        }
        self.inner
            .identity
            .update_profile(Some(display_name), None)
            .await?;

        profile.display_name = Some(display_name.to_string());
        profile.name = display_name.to_string();
        self.inner.upsert(profile.clone()).await?;
        Ok(profile)
    }

    async fn current_or_new(&self) -> Result<UserProfile, RepositoryError> {
        let user = self
            .inner
            .identity
            .current_user()
            .await
            .ok_or(RepositoryError::NotSignedIn)?;
        let existing = self.inner.store.get(&user.uid, user.uid.as_str()).await?;
        Ok(existing.unwrap_or_else(|| UserProfile::for_user(&user)))
    }
}
