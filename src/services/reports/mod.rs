pub mod leaderboard;
pub mod report;
mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
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

    /// 获取竞赛排行榜
    pub async fn get_leaderboard(
        &self,
        request: &HttpRequest,
        competition_id: i64,
    ) -> ActixResult<HttpResponse> {
        leaderboard::get_leaderboard(self, request, competition_id).await
    }

    /// 生成竞赛分析报告
    pub async fn get_report(
        &self,
        request: &HttpRequest,
        competition_id: i64,
    ) -> ActixResult<HttpResponse> {
        report::get_report(self, request, competition_id).await
    }
}
