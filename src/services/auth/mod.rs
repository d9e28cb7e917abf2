pub mod login;
pub mod profile;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::auth::LoginRequest;
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &'static AppConfig {
        AppConfig::get()
    }

    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    pub async fn profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_profile(request).await
    }
}
