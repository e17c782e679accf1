pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::submissions::requests::SubmissionListQuery;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Cache not found in app data")
            .get_ref()
            .clone()
    }

    /// 批量上传提交文件
    pub async fn upload_submissions(
        &self,
        request: &HttpRequest,
        competition_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_submissions(self, request, competition_id, payload).await
    }

    /// 列出提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        competition_id: i64,
        query: SubmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, competition_id, query).await
    }
}
