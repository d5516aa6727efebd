//! Account domain service: registration, login and profile reads.
//!
//! One service implements every account-facing driving port so they share a
//! single [`UserRepository`] and clock. Password hashing runs on the blocking
//! pool because argon2 is deliberately slow.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::face::{FaceDescriptor, FaceMatch, best_match};
use crate::domain::ports::{
    FaceLoginService, LoginService, UniqueUserField, UserPersistenceError, UserProfileQuery,
    UserRegistration, UserRepository,
};
use crate::domain::{
    Email, Error, LoginCredentials, NewUser, PasswordHash, Registration, Signup, User, UserId,
};

/// Account service implementing the login, registration and profile ports.
#[derive(Clone)]
pub struct AccountService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    face_match_threshold: Option<f64>,
}

impl<R> AccountService<R> {
    /// Create a service with face matching switched off.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            face_match_threshold: None,
        }
    }

    /// Enable face matching with the given maximum descriptor distance.
    #[must_use]
    pub fn with_face_matching(mut self, threshold: f64) -> Self {
        self.face_match_threshold = Some(threshold);
        self
    }
}

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Duplicate { field } => {
            Error::conflict(format!("a user with this {field} already exists"))
                .with_details(json!({ "field": field }))
        }
        other => {
            tracing::error!(error = %other, "user store failure");
            Error::internal("user store error")
        }
    }
}

async fn hash_password(password: Zeroizing<String>) -> Result<PasswordHash, Error> {
    let hashed = tokio::task::spawn_blocking(move || PasswordHash::hash(password.as_str()))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "password hashing task failed");
            Error::internal("password hashing failed")
        })?;
    hashed.map_err(|err| {
        tracing::error!(error = %err, "password hashing failed");
        Error::internal("password hashing failed")
    })
}

async fn verify_password(hash: PasswordHash, password: Zeroizing<String>) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || hash.verify(password.as_str()))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "password verification task failed");
            Error::internal("password verification failed")
        })
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    async fn ensure_unique(&self, field: UniqueUserField, value: &str) -> Result<(), Error> {
        let taken = self
            .repo
            .exists(field, value)
            .await
            .map_err(map_repository_error)?;
        if taken {
            return Err(map_repository_error(UserPersistenceError::duplicate(
                field.as_str(),
            )));
        }
        Ok(())
    }

    async fn store(&self, user: NewUser) -> Result<User, Error> {
        let stored = self.repo.insert(user).await.map_err(map_repository_error)?;
        tracing::info!(user_id = %stored.user.id, "account registered");
        Ok(stored.into_user())
    }
}

#[async_trait]
impl<R> UserRegistration for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        self.ensure_unique(UniqueUserField::Email, registration.email.as_ref())
            .await?;
        let password_hash = match registration.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };
        self.store(NewUser {
            name: registration.name,
            email: registration.email,
            password_hash,
            mobile: None,
            aadhar: None,
            face_data: registration.face_data,
            created_at: self.clock.utc(),
        })
        .await
    }

    async fn signup(&self, signup: Signup) -> Result<User, Error> {
        self.ensure_unique(UniqueUserField::Email, signup.email.as_ref())
            .await?;
        self.ensure_unique(UniqueUserField::Aadhar, &signup.aadhar)
            .await?;
        self.ensure_unique(UniqueUserField::Mobile, &signup.mobile)
            .await?;
        let password_hash = hash_password(signup.password).await?;
        self.store(NewUser {
            name: signup.name,
            email: signup.email,
            password_hash: Some(password_hash),
            mobile: Some(signup.mobile),
            aadhar: Some(signup.aadhar),
            face_data: Some(signup.face_data),
            created_at: self.clock.utc(),
        })
        .await
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let email = Email::new(credentials.email())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let stored = self
            .repo
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        let Some(hash) = stored.password_hash.clone() else {
            return Err(Error::unauthorized("password login is not set up for this account"));
        };
        let matches =
            verify_password(hash, Zeroizing::new(credentials.password().to_owned())).await?;
        if !matches {
            tracing::info!(user_id = %stored.user.id, "password mismatch");
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(stored.into_user())
    }
}

#[async_trait]
impl<R> FaceLoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn authenticate_face(&self, face_data: &str) -> Result<User, Error> {
        let Some(threshold) = self.face_match_threshold else {
            return Err(Error::not_implemented("face login is not enabled"));
        };
        let probe = FaceDescriptor::parse(face_data)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let enrolled = self
            .repo
            .list_with_face_data()
            .await
            .map_err(map_repository_error)?;
        let candidates = enrolled.into_iter().filter_map(|stored| {
            let raw = stored.face_data.clone()?;
            Some((stored.user, raw))
        });

        match best_match(&probe, candidates, threshold) {
            FaceMatch::Matched {
                candidate,
                distance,
            } => {
                tracing::info!(user_id = %candidate.id, distance, "face matched");
                Ok(candidate)
            }
            FaceMatch::NoMatch { closest_distance } => {
                tracing::info!(closest_distance, threshold, "face not recognised");
                Err(Error::unauthorized("face not recognised"))
            }
            FaceMatch::NoCandidates => Err(Error::not_found("no enrolled face data")),
        }
    }
}

#[async_trait]
impl<R> UserProfileQuery for AccountService<R>
where
    R: UserRepository,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .map(crate::domain::StoredUser::into_user)
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
