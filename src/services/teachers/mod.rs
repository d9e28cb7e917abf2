pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    /// 测试注入用
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
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

    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request).await
    }
}
