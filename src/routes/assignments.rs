use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::services::AssignmentService;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 创建赛题
pub async fn create_assignment(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, path.into_inner(), body.into_inner())
        .await
}

// 列出赛题
pub async fn list_assignments(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/competitions/{competition_id}/assignments")
            .route("", web::post().to(create_assignment))
            .route("", web::get().to(list_assignments)),
    );
}
