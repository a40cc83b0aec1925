use crate::api::ApiClient;
use crate::error::OperationError;
use crate::models::{Category, CategoryCreate, CategoryQuery, CategoryUpdate, Page};
use crate::services::collect_pages;

const CREATE_FAILED: &str = "Erro ao cadastrar categoria";
const GET_FAILED: &str = "Erro ao buscar categoria";
const LIST_FAILED: &str = "Erro ao listar categorias";
const UPDATE_FAILED: &str = "Erro ao atualizar categoria";
const DELETE_FAILED: &str = "Erro ao deletar categoria";

#[derive(Clone)]
pub struct CategoryService {
    api: ApiClient,
}

impl CategoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, data: &CategoryCreate) -> Result<Category, OperationError> {
        self.api
            .post_json("/categories/", data)
            .await
            .map_err(|e| OperationError::normalize(e, CREATE_FAILED))
    }

    pub async fn get(&self, id: i64) -> Result<Category, OperationError> {
        self.api
            .get_json(&format!("/categories/{}", id))
            .await
            .map_err(|e| OperationError::normalize(e, GET_FAILED))
    }

    /// `category_type` is left out of the query string when unset
    pub async fn list(&self, query: Option<CategoryQuery>) -> Result<Vec<Category>, OperationError> {
        let query = query.unwrap_or_default();
        self.api
            .get_json_with_query("/categories/", &query)
            .await
            .map_err(|e| OperationError::normalize(e, LIST_FAILED))
    }

    /// Only name and color can change; the kind is fixed at creation
    pub async fn update(&self, id: i64, data: &CategoryUpdate) -> Result<Category, OperationError> {
        self.api
            .patch_json(&format!("/categories/{}", id), data)
            .await
            .map_err(|e| OperationError::normalize(e, UPDATE_FAILED))
    }

    pub async fn delete(&self, id: i64) -> Result<(), OperationError> {
        self.api
            .delete(&format!("/categories/{}", id))
            .await
            .map_err(|e| OperationError::normalize(e, DELETE_FAILED))
    }

    pub async fn list_all(&self, page_size: u32) -> Result<Vec<Category>, OperationError> {
        collect_pages(Page::new(0, page_size.max(1)), |page| {
            self.list(Some(CategoryQuery {
                page,
                category_type: None,
            }))
        })
        .await
    }
}
