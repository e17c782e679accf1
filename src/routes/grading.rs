use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::GradingService;

// 懒加载的全局 GradingService 实例
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);

// 启动批次评分
pub async fn start_grading(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.start_grading(&req, path.into_inner()).await
}

// 查询评分进度
pub async fn get_grading_status(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .get_grading_status(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_grading_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/competitions/{competition_id}/grading")
            .route("", web::post().to(start_grading))
            .route("/status", web::get().to(get_grading_status)),
    );
}
