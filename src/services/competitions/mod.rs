pub mod create;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::competitions::requests::CreateCompetitionRequest;
use crate::storage::Storage;

pub struct CompetitionService {
    storage: Option<Arc<dyn Storage>>,
}

impl CompetitionService {
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

    /// 创建竞赛
    pub async fn create_competition(
        &self,
        request: &HttpRequest,
        req: CreateCompetitionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_competition(self, request, req).await
    }

    /// 列出竞赛
    pub async fn list_competitions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_competitions(self, request).await
    }

    /// 获取竞赛详情（聚合赛题、参赛者与提交）
    pub async fn get_competition(
        &self,
        request: &HttpRequest,
        competition_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_competition(self, request, competition_id).await
    }
}
