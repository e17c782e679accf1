use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::competitions::requests::CreateCompetitionRequest;
use crate::services::CompetitionService;

// 懒加载的全局 CompetitionService 实例
static COMPETITION_SERVICE: Lazy<CompetitionService> = Lazy::new(CompetitionService::new_lazy);

// 创建竞赛
pub async fn create_competition(
    req: HttpRequest,
    body: web::Json<CreateCompetitionRequest>,
) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE
        .create_competition(&req, body.into_inner())
        .await
}

// 列出竞赛
pub async fn list_competitions(req: HttpRequest) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE.list_competitions(&req).await
}

// 获取竞赛详情
pub async fn get_competition(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE
        .get_competition(&req, path.into_inner())
        .await
}

// 配置路由
//
// 这里用精确 resource 而不是 scope：/api/v1/competitions 前缀下还挂着
// 赛题、参赛者、提交、评分等子路由，scope 会把前缀吞掉导致子路由 404。
pub fn configure_competitions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/competitions")
            .route(web::post().to(create_competition))
            .route(web::get().to(list_competitions)),
    );
    cfg.service(web::resource("/api/v1/competitions/{id}").route(web::get().to(get_competition)));
}
