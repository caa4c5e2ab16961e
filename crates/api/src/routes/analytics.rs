//! # 指标计算路由控制器
//!
//! 对调用方直接提交的序列计算技术指标，不经过行情源与归一化流程。

use axum::Json;
use axum::extract::State;
use quoteboard_analytics::indicators::compute_overlays;
use quoteboard_core::config::IndicatorConfig;
use quoteboard_core::market::entity::LoosePoint;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, OverlayPointResponse, OverlayRequest};

/// 计算自定义序列的技术指标
///
/// 数据点的收盘价依次取 `close`、`price`，均缺失时按 0 计；成交量缺失按 0 计。
#[utoipa::path(
    post,
    path = "/api/v1/analytics/overlays",
    tag = "指标 (Analytics)",
    request_body = OverlayRequest,
    responses(
        (status = 200, description = "计算成功", body = ApiResponse<Vec<OverlayPointResponse>>),
        (status = 400, description = "请求参数错误")
    )
)]
pub async fn compute_overlay_series(
    State(state): State<AppState>,
    Json(req): Json<OverlayRequest>,
) -> Result<Json<ApiResponse<Vec<OverlayPointResponse>>>, ApiError> {
    let config: IndicatorConfig = req
        .config
        .map(Into::into)
        .unwrap_or(state.app_config.indicators);
    if !config.bb_std_dev_multiplier.is_finite() {
        return Err(ApiError::BadRequest(
            "bbStdDevMultiplier must be a finite number".to_string(),
        ));
    }

    let points: Vec<LoosePoint> = req.points.into_iter().map(Into::into).collect();
    let overlays = compute_overlays(&points, &config);

    Ok(Json(ApiResponse::ok(
        overlays.into_iter().map(OverlayPointResponse::from).collect(),
    )))
}
