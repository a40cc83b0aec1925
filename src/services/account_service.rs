use crate::api::ApiClient;
use crate::error::OperationError;
use crate::models::{Account, AccountCreate, AccountUpdate, Page};
use crate::services::collect_pages;

const CREATE_FAILED: &str = "Erro ao cadastrar conta";
const GET_FAILED: &str = "Erro ao buscar conta";
const LIST_FAILED: &str = "Erro ao listar contas";
const UPDATE_FAILED: &str = "Erro ao atualizar conta";
const DELETE_FAILED: &str = "Erro ao deletar conta";

#[derive(Clone)]
pub struct AccountService {
    api: ApiClient,
}

impl AccountService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// POST /accounts/
    pub async fn create(&self, data: &AccountCreate) -> Result<Account, OperationError> {
        self.api
            .post_json("/accounts/", data)
            .await
            .map_err(|e| OperationError::normalize(e, CREATE_FAILED))
    }

    /// GET /accounts/{id}
    pub async fn get(&self, id: i64) -> Result<Account, OperationError> {
        self.api
            .get_json(&format!("/accounts/{}", id))
            .await
            .map_err(|e| OperationError::normalize(e, GET_FAILED))
    }

    /// GET /accounts/?limit&offset. `None` means offset 0, limit 10.
    pub async fn list(&self, page: Option<Page>) -> Result<Vec<Account>, OperationError> {
        let page = page.unwrap_or_default();
        self.api
            .get_json_with_query("/accounts/", &page)
            .await
            .map_err(|e| OperationError::normalize(e, LIST_FAILED))
    }

    /// PATCH /accounts/{id}
    pub async fn update(&self, id: i64, data: &AccountUpdate) -> Result<Account, OperationError> {
        self.api
            .patch_json(&format!("/accounts/{}", id), data)
            .await
            .map_err(|e| OperationError::normalize(e, UPDATE_FAILED))
    }

    /// DELETE /accounts/{id}
    pub async fn delete(&self, id: i64) -> Result<(), OperationError> {
        self.api
            .delete(&format!("/accounts/{}", id))
            .await
            .map_err(|e| OperationError::normalize(e, DELETE_FAILED))
    }

    /// Walk every page until the API returns a short one
    pub async fn list_all(&self, page_size: u32) -> Result<Vec<Account>, OperationError> {
        collect_pages(Page::new(0, page_size.max(1)), |page| self.list(Some(page))).await
    }
}
