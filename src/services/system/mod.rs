//! 系统服务：健康检查与运行信息

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use ts_rs::TS;

use crate::config::AppConfig;
use crate::models::{ApiResponse, AppStartTime};

/// 系统运行信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemInfoResponse {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: i64,
}

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 健康检查
    pub async fn health(&self, _request: &HttpRequest) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("healthy")))
    }

    /// 系统信息
    pub async fn info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let config = AppConfig::get();

        let uptime_seconds = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|start| {
                chrono::Utc::now()
                    .signed_duration_since(start.start_datetime)
                    .num_seconds()
            })
            .unwrap_or(0);

        let info = SystemInfoResponse {
            system_name: config.app.system_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: config.app.environment.clone(),
            uptime_seconds,
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(info, "查询成功")))
    }
}
