use crate::api::ApiClient;
use crate::error::OperationError;
use crate::models::{AuthMessage, Credentials};

const LOGIN_FAILED: &str = "Erro ao realizar login";
const LOGOUT_FAILED: &str = "Erro ao realizar logout";

/// Session mutations. Checking the current session is the prober's job.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// POST /auth/login. On success the API sets the `sid` cookie,
    /// which the shared client picks up.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthMessage, OperationError> {
        let message: AuthMessage = self
            .api
            .post_json("/auth/login", credentials)
            .await
            .map_err(|e| OperationError::normalize(e, LOGIN_FAILED))?;

        if self.api.session_id().is_none() {
            tracing::warn!("Login succeeded but no session cookie was set");
        }
        Ok(message)
    }

    /// POST /auth/logout. The local session is dropped even if the API
    /// does not clear the cookie itself.
    pub async fn logout(&self) -> Result<(), OperationError> {
        self.api
            .post_unit::<()>("/auth/logout", None)
            .await
            .map_err(|e| OperationError::normalize(e, LOGOUT_FAILED))?;
        self.api.set_session_id(None);
        Ok(())
    }
}
