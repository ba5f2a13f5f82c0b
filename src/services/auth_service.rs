use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{Role, User};
use crate::repository::CatalogStore;

/// Portal login and registration on top of the store's placeholder auth.
pub struct AuthService {
    store: CatalogStore,
}

impl AuthService {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Logs in through the portal for `role`. A matching account with another
    /// role is refused and the session it opened is cleared again.
    pub async fn login_as(&self, email: &str, password: &str, role: Role) -> Result<User, AppError> {
        let user = self
            .store
            .login(email.trim(), password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if user.role != role {
            warn!("user {} tried the {} portal", user.id, role);
            self.store.logout().await?;
            return Err(AppError::RoleMismatch(role));
        }

        Ok(user)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AppError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("name is required".to_string()));
        }
        if email.is_empty() {
            return Err(AppError::BadRequest("email is required".to_string()));
        }

        let user = self.store.register(name, email, password).await?;
        info!("welcome, {}", user.name);
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.store.logout().await
    }

    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        self.store.get_current_user().await
    }

    /// Fails unless the session belongs to an admin.
    pub async fn require_admin(&self) -> Result<User, AppError> {
        match self.store.get_current_user().await? {
            Some(user) if user.role == Role::Admin => Ok(user),
            Some(_) => Err(AppError::Forbidden("admin session required".to_string())),
            None => Err(AppError::Forbidden("not logged in".to_string())),
        }
    }
}
