pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    /// 创建赛题
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        competition_id: i64,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, competition_id, req).await
    }

    /// 列出竞赛下的赛题
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        competition_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, competition_id).await
    }
}
