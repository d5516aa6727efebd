//! MongoDB-backed `UserRepository` implementation.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;

use crate::domain::ports::{UniqueUserField, UserPersistenceError, UserRepository};
use crate::domain::{Email, NewUser, StoredUser, UserId};

use super::connection::ConnectionManager;
use super::documents::UserDocument;
use super::mongo::{MongoConnector, MongoStore};
use super::mongo_error_mapping::map_user_error;

/// MongoDB-backed implementation of [`UserRepository`].
#[derive(Clone)]
pub struct MongoUserRepository {
    connection: Arc<ConnectionManager<MongoConnector>>,
}

impl MongoUserRepository {
    /// Create a repository sharing `connection`.
    pub fn new(connection: Arc<ConnectionManager<MongoConnector>>) -> Self {
        Self { connection }
    }

    async fn store(&self) -> Result<MongoStore, UserPersistenceError> {
        Ok(self.connection.connect().await?)
    }
}

fn into_stored(document: UserDocument) -> Result<StoredUser, UserPersistenceError> {
    StoredUser::try_from(document).map_err(|err| UserPersistenceError::query(err.to_string()))
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: NewUser) -> Result<StoredUser, UserPersistenceError> {
        let store = self.store().await?;
        let result = store
            .users()
            .insert_one(UserDocument::from(&user))
            .await
            .map_err(|err| map_user_error(&err))?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| UserPersistenceError::query("store did not return an ObjectId"))?;
        let id =
            UserId::new(id.to_hex()).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        Ok(user.with_id(id))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<StoredUser>, UserPersistenceError> {
        let Ok(oid) = ObjectId::parse_str(id.as_ref()) else {
            return Ok(None);
        };
        let store = self.store().await?;
        store
            .users()
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|err| map_user_error(&err))?
            .map(into_stored)
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let store = self.store().await?;
        store
            .users()
            .find_one(doc! { "email": email.as_ref() })
            .await
            .map_err(|err| map_user_error(&err))?
            .map(into_stored)
            .transpose()
    }

    async fn exists(
        &self,
        field: UniqueUserField,
        value: &str,
    ) -> Result<bool, UserPersistenceError> {
        let store = self.store().await?;
        let count = store
            .users()
            .count_documents(doc! { field.as_str(): value })
            .limit(1)
            .await
            .map_err(|err| map_user_error(&err))?;
        Ok(count > 0)
    }

    async fn list_with_face_data(&self) -> Result<Vec<StoredUser>, UserPersistenceError> {
        let store = self.store().await?;
        let documents: Vec<UserDocument> = store
            .users()
            .find(doc! { "faceData": { "$type": "string", "$ne": "" } })
            .await
            .map_err(|err| map_user_error(&err))?
            .try_collect()
            .await
            .map_err(|err| map_user_error(&err))?;
        documents.into_iter().map(into_stored).collect()
    }
}
