pub mod import;
pub mod list;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct ParticipantService {
    storage: Option<Arc<dyn Storage>>,
}

impl ParticipantService {
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

    /// 导入参赛者名单（CSV/XLSX）
    pub async fn import_participants(
        &self,
        request: &HttpRequest,
        competition_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        import::import_participants(self, request, competition_id, payload).await
    }

    /// 列出竞赛下的参赛者
    pub async fn list_participants(
        &self,
        request: &HttpRequest,
        competition_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_participants(self, request, competition_id).await
    }
}
