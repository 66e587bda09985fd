//! Credential operations: activation resend and authentication.

use issuetrack_notifier::{templates, Notification};
use issuetrack_shared::auth::jwt::{issue_credential, verify_credential, Claims};
use issuetrack_shared::auth::password::verify_password;
use issuetrack_shared::models::token::TokenScope;
use issuetrack_shared::models::user::{validate_email, validate_password_plaintext, User};
use issuetrack_shared::store::StoreError;
use issuetrack_shared::validate::Validator;

use crate::error::{ServiceError, ServiceResult};
use crate::service::Service;

impl Service {
    /// Issues a fresh activation token for an unactivated account and
    /// schedules the mail carrying it.
    pub async fn create_activation_token(&self, email: &str) -> ServiceResult<()> {
        let user = self.get_user_by_email(email).await?;
        if user.activated {
            return Err(ServiceError::AlreadyActivated);
        }
        let scope = TokenScope::Activation;
        let token = self
            .run_store(self.repos.tokens.create_token(user.id, scope.default_ttl(), scope))
            .await?;
        self.notifier.dispatch(
            Notification::new(&user.email, templates::TOKEN_ACTIVATION)
                .with("name", &user.name)
                .with("activationToken", &token.plaintext),
        );
        Ok(())
    }

    /// Verifies a submitted password and issues a signed bearer credential.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<String> {
        let mut v = Validator::new();
        validate_email(&mut v, email);
        validate_password_plaintext(&mut v, password);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        let user = match self.run_store(self.repos.users.get_user_by_email(email)).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Err(ServiceError::InvalidCredentials),
            Err(err) => return Err(err.into()),
        };
        let matched = verify_password(password, &user.password_hash).map_err(anyhow::Error::new)?;
        if !matched {
            return Err(ServiceError::InvalidCredentials);
        }
        let credential =
            issue_credential(&Claims::new(user.id), &self.jwt_secret).map_err(anyhow::Error::new)?;
        tracing::info!(user_id = %user.id, "credential issued");
        Ok(credential)
    }

    /// Resolves the user behind a presented bearer credential. Every
    /// verification failure reports the same `InvalidCredentials` kind.
    pub async fn user_for_credential(&self, credential: &str) -> ServiceResult<User> {
        let claims = verify_credential(credential, &self.jwt_secret)
            .map_err(|_| ServiceError::InvalidCredentials)?;
        match self.run_store(self.repos.users.get_user(claims.sub)).await {
            Ok(user) => Ok(user),
            Err(StoreError::NotFound) => Err(ServiceError::InvalidCredentials),
            Err(err) => Err(err.into()),
        }
    }
}
