//! User operations: account lifecycle and activation.

use issuetrack_notifier::{templates, Notification};
use issuetrack_shared::auth::password::hash_password;
use issuetrack_shared::filters::{Filters, Metadata};
use issuetrack_shared::models::token::{validate_token_plaintext, Token, TokenScope};
use issuetrack_shared::models::user::{
    validate_email, validate_password_plaintext, Role, User,
};
use issuetrack_shared::store::{StoreError, UserFilter};
use issuetrack_shared::validate::Validator;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::service::Service;

/// Sort keys the user listing accepts.
pub const USER_SORT_SAFELIST: &[&str] =
    &["id", "name", "email", "role", "-id", "-name", "-email", "-role"];

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl Service {
    /// Creates an unactivated account, issues an activation token and
    /// schedules the welcome mail carrying it.
    pub async fn create_user(&self, input: CreateUserInput) -> ServiceResult<User> {
        let mut v = Validator::new();
        validate_password_plaintext(&mut v, &input.password);
        let password_hash = hash_password(&input.password).map_err(anyhow::Error::new)?;
        let user = User::new(input.name, input.email, password_hash, input.role);
        user.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        let user = match self.run_store(self.repos.users.create_user(user)).await {
            Ok(user) => user,
            Err(StoreError::DuplicateKey) => {
                v.add_error("email", "a user with this email address already exists");
                return Err(ServiceError::failed_validation(v));
            }
            Err(err) => return Err(err.into()),
        };
        let scope = TokenScope::Activation;
        let token = self
            .run_store(self.repos.tokens.create_token(user.id, scope.default_ttl(), scope))
            .await?;
        self.notifier.dispatch(
            Notification::new(&user.email, templates::USER_WELCOME)
                .with("name", &user.name)
                .with("activationToken", &token.plaintext),
        );
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> ServiceResult<User> {
        Ok(self.run_store(self.repos.users.get_user(id)).await?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> ServiceResult<User> {
        let mut v = Validator::new();
        validate_email(&mut v, email);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        match self.run_store(self.repos.users.get_user_by_email(email)).await {
            Ok(user) => Ok(user),
            Err(StoreError::NotFound) => {
                v.add_error("email", "no matching email address found");
                Err(ServiceError::failed_validation(v))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_all_users(
        &self,
        filter: UserFilter,
        filters: Filters,
    ) -> ServiceResult<(Vec<User>, Metadata)> {
        let mut v = Validator::new();
        filters.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        Ok(self
            .run_store(self.repos.users.get_all_users(filter, &filters))
            .await?)
    }

    /// Applies the requested deltas, re-validates and submits with the
    /// version read at fetch time.
    pub async fn update_user(&self, id: Uuid, input: UpdateUserInput) -> ServiceResult<User> {
        let mut user = self.run_store(self.repos.users.get_user(id)).await?;
        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        let mut v = Validator::new();
        user.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        match self.run_store(self.repos.users.update_user(user)).await {
            Ok(user) => Ok(user),
            Err(StoreError::DuplicateKey) => {
                v.add_error("email", "a user with this email address already exists");
                Err(ServiceError::failed_validation(v))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete_user(&self, id: Uuid) -> ServiceResult<()> {
        self.run_store(self.repos.users.delete_user(id)).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Redeems an activation token.
    ///
    /// The flag flip and the token deletion are two separate store calls; a
    /// deletion failure leaves the token redeemable against the already
    /// activated account.
    pub async fn activate_user(&self, token_plaintext: &str) -> ServiceResult<User> {
        let mut v = Validator::new();
        validate_token_plaintext(&mut v, token_plaintext);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        let hash = Token::hash_plaintext(token_plaintext);
        let mut user = match self
            .run_store(self.repos.users.get_user_for_token(TokenScope::Activation, &hash))
            .await
        {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                v.add_error("token", "invalid or expired activation token");
                return Err(ServiceError::failed_validation(v));
            }
            Err(err) => return Err(err.into()),
        };
        user.activated = true;
        let user = self.run_store(self.repos.users.update_user(user)).await?;
        self.run_store(
            self.repos
                .tokens
                .delete_all_tokens_for_user(TokenScope::Activation, user.id),
        )
        .await?;
        tracing::info!(user_id = %user.id, "user activated");
        Ok(user)
    }
}
