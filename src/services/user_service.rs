use crate::api::ApiClient;
use crate::error::OperationError;
use crate::models::UserCreate;

const CREATE_FAILED: &str = "Erro ao criar usuário";
const DELETE_FAILED: &str = "Erro ao excluir conta";

#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register a new user. The response body is not used.
    pub async fn create(&self, data: &UserCreate) -> Result<(), OperationError> {
        self.api
            .post_unit("/users/", Some(data))
            .await
            .map_err(|e| OperationError::normalize(e, CREATE_FAILED))
    }

    /// Delete a user (the API only allows deleting yourself)
    pub async fn delete(&self, id: i64) -> Result<(), OperationError> {
        self.api
            .delete(&format!("/users/{}", id))
            .await
            .map_err(|e| OperationError::normalize(e, DELETE_FAILED))
    }
}
