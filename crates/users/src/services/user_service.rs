//! User service: registration and opaque identifier resolution.

use sqlx::SqlitePool;
use waypost_database::{NewUser, User, UserError, UserRepository, UserResult};
use waypost_opaque_id::{OpaqueIdCodec, OpaqueKeyed};

use crate::types::RegisterUserRequest;
use crate::utils::password;

/// Storage interface the service is generic over.
///
/// Mirrors what the persistence layer offers: create, lookups by primary
/// key and by column equality, and the single-column opaque-id write.
pub trait UserRepo {
    async fn create(&self, new_user: &NewUser) -> UserResult<User>;
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;
    async fn find_by_opaque_id(&self, opaque_id: &str) -> UserResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;
    async fn set_opaque_id(&self, user_id: i64, opaque_id: &str) -> UserResult<u64>;
}

impl UserRepo for UserRepository {
    async fn create(&self, new_user: &NewUser) -> UserResult<User> {
        self.create(new_user).await
    }

    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        self.find_by_id(id).await
    }

    async fn find_by_opaque_id(&self, opaque_id: &str) -> UserResult<Option<User>> {
        self.find_by_opaque_id(opaque_id).await
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.find_by_email(email).await
    }

    async fn set_opaque_id(&self, user_id: i64, opaque_id: &str) -> UserResult<u64> {
        self.set_opaque_id(user_id, opaque_id).await
    }
}

/// Service for user registration and opaque identifier operations
pub struct UserService<R> {
    user_repository: R,
    codec: OpaqueIdCodec,
}

impl UserService<UserRepository> {
    /// Create a new user service backed by the real database repository
    pub fn new(pool: SqlitePool, codec: OpaqueIdCodec) -> Self {
        Self {
            user_repository: UserRepository::new(pool),
            codec,
        }
    }
}

impl<R> UserService<R>
where
    R: UserRepo,
{
    /// Create a user service over any repository implementation
    pub fn with_repository(user_repository: R, codec: OpaqueIdCodec) -> Self {
        Self {
            user_repository,
            codec,
        }
    }

    /// The registration action: validate the command, reject duplicate
    /// emails, hash the password, create the row, and materialize the
    /// opaque identifier for it.
    pub async fn register(&self, request: RegisterUserRequest) -> UserResult<User> {
        request.validate()?;

        if self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists);
        }

        let password_hash = password::hash_password(&request.password)?;
        let new_user = NewUser {
            email: request.email,
            username: request.username,
            display_name: request.display_name,
            password_hash,
        };

        let mut user = self.user_repository.create(&new_user).await?;
        let opaque_id = self.materialize_opaque_id(&user).await?;
        user.opaque_id = Some(opaque_id);

        tracing::info!(user_id = user.id, username = %user.username, "registered new user");

        Ok(user)
    }

    /// Compute and persist the opaque identifier for a freshly created row.
    ///
    /// A no-op once the column is populated: the stored value is returned
    /// unchanged on every later call.
    pub async fn materialize_opaque_id(&self, user: &User) -> UserResult<String> {
        if let Some(stored) = user.stored_opaque_id() {
            if !stored.is_empty() {
                return Ok(stored.to_string());
            }
        }

        let opaque_id = self.codec.encode(user.primary_key());
        let affected = self
            .user_repository
            .set_opaque_id(user.id, &opaque_id)
            .await?;

        if affected == 0 {
            // The column was populated between our read and the write. The
            // stored value is authoritative (and, being a pure function of
            // the id, identical to what we just computed).
            let current = self
                .user_repository
                .find_by_id(user.id)
                .await?
                .ok_or(UserError::UserNotFound)?;
            if let Some(stored) = current.opaque_id {
                return Ok(stored);
            }
        }

        Ok(opaque_id)
    }

    /// Resolve an opaque identifier to the user it was issued for.
    ///
    /// Decodes first: strings the codec never produced fail with
    /// `UserNotFound` without touching storage. A successful decode is
    /// followed by a primary-key lookup, which can still miss.
    pub async fn resolve(&self, opaque_id: &str) -> UserResult<User> {
        let Some(id) = self.codec.decode(opaque_id) else {
            return Err(UserError::UserNotFound);
        };

        let id = i64::try_from(id).map_err(|_| UserError::UserNotFound)?;

        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    /// Resolve through the stored opaque-id column instead of decoding.
    ///
    /// Behaviorally equivalent to [`resolve`](Self::resolve) for every
    /// identifier this backend issued; a single column-equality lookup.
    pub async fn resolve_stored(&self, opaque_id: &str) -> UserResult<User> {
        self.user_repository
            .find_by_opaque_id(opaque_id)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    /// The opaque identifier of a user: the stored value, or an on-the-fly
    /// encoding for rows created before materialization. Pure read.
    pub fn opaque_id_of(&self, user: &User) -> String {
        self.codec.opaque_id_of(user)
    }

    /// Stateless decode of an opaque identifier to a primary key.
    pub fn find_id_by_opaque(&self, opaque_id: &str) -> Option<u64> {
        self.codec.find_id_by_opaque(opaque_id)
    }
}
