use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

// 健康检查
pub async fn health(req: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.health(&req).await
}

// 系统信息
pub async fn info(req: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.info(&req).await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .route("/health", web::get().to(health))
            .route("/info", web::get().to(info)),
    );
}
