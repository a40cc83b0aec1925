use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::SessionProber;
use crate::config::ClientConfig;
use crate::error::CollaboratorError;
use crate::middleware::RouteGuard;
use crate::routes::Navigator;
use crate::services::{AccountService, AuthService, CategoryService, DashboardService, UserService};

/// Everything a front end needs, wired around one shared `ApiClient`.
/// Build it once at startup and drop it at shutdown.
pub struct FinanceContext {
    pub api: ApiClient,
    pub prober: Arc<SessionProber>,
    pub navigator: Navigator,
    pub accounts: AccountService,
    pub categories: CategoryService,
    pub users: UserService,
    pub auth: AuthService,
    pub dashboard: DashboardService,
}

impl FinanceContext {
    pub fn new(config: &ClientConfig) -> Result<Self, CollaboratorError> {
        Ok(Self::from_client(ApiClient::new(&config.api)?))
    }

    pub fn from_client(api: ApiClient) -> Self {
        let prober = Arc::new(SessionProber::new(api.clone()));
        let navigator = Navigator::new(RouteGuard::new(prober.clone()));
        let accounts = AccountService::new(api.clone());
        let categories = CategoryService::new(api.clone());

        Self {
            prober,
            navigator,
            dashboard: DashboardService::new(accounts.clone(), categories.clone()),
            accounts,
            categories,
            users: UserService::new(api.clone()),
            auth: AuthService::new(api.clone()),
            api,
        }
    }
}
