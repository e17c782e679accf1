use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::ReportService;

// 懒加载的全局 ReportService 实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

// 获取排行榜
pub async fn get_leaderboard(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.get_leaderboard(&req, path.into_inner()).await
}

// 生成分析报告
pub async fn get_report(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.get_report(&req, path.into_inner()).await
}

// 配置路由
//
// 精确 resource，避免与 /api/v1/competitions 下的其他子路由抢前缀。
pub fn configure_reports_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/competitions/{competition_id}/leaderboard")
            .route(web::get().to(get_leaderboard)),
    );
    cfg.service(
        web::resource("/api/v1/competitions/{competition_id}/report")
            .route(web::get().to(get_report)),
    );
}
