pub mod start;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::oracle::Oracle;
use crate::storage::Storage;

pub struct GradingService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradingService {
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

    pub(crate) fn get_oracle(&self, request: &HttpRequest) -> Arc<dyn Oracle> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn Oracle>>>()
            .expect("Oracle not found in app data")
            .get_ref()
            .clone()
    }

    /// 启动一轮批次评分（后台执行，立即返回入队数量）
    pub async fn start_grading(
        &self,
        request: &HttpRequest,
        competition_id: i64,
    ) -> ActixResult<HttpResponse> {
        start::start_grading(self, request, competition_id).await
    }

    /// 查询评分进度（各状态提交数量）
    pub async fn get_grading_status(
        &self,
        request: &HttpRequest,
        competition_id: i64,
    ) -> ActixResult<HttpResponse> {
        status::get_grading_status(self, request, competition_id).await
    }
}
