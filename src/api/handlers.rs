use crate::adapter::{write_report_to_buffer, REPORT_FILE_NAME, XLSX_CONTENT_TYPE};
use crate::error::ReconcileError;
use crate::models::{ReconciliationResult, Table};
use crate::service::Reconciler;
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 请求体: 发票表 + ERP 表
#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    pub invoice: Table,
    pub erp: Table,
}

/// 响应体
#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub success: bool,
    pub message: String,
    pub error_code: Option<&'static str>,
    pub generated_at: DateTime<Utc>,
    pub result: Option<ReconciliationResult>,
}

impl ReconcileResponse {
    fn failure(e: &ReconcileError) -> Self {
        Self {
            success: false,
            message: format!("Error: {}", e),
            error_code: Some(e.code()),
            generated_at: Utc::now(),
            result: None,
        }
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

fn run(reconciler: &Reconciler, req: &ReconcileRequest) -> Result<ReconciliationResult, Response> {
    reconciler.reconcile(&req.invoice, &req.erp).map_err(|e| {
        tracing::warn!("对账失败: {}", e);
        (StatusCode::UNPROCESSABLE_ENTITY, Json(ReconcileResponse::failure(&e))).into_response()
    })
}

/// 对账接口, 返回 JSON 结果
pub async fn reconcile(
    State(reconciler): State<Arc<Reconciler>>,
    Json(req): Json<ReconcileRequest>,
) -> Response {
    let result = match run(&reconciler, &req) {
        Ok(result) => result,
        Err(resp) => return resp,
    };

    let response = ReconcileResponse {
        success: true,
        message: format!(
            "Reconciled {} products: {} price changes, {} new products",
            result.stats.total_invoice_rows, result.stats.price_changes, result.stats.new_products
        ),
        error_code: None,
        generated_at: Utc::now(),
        result: Some(result),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// 对账接口, 返回三表 xlsx 报告
pub async fn reconcile_report(
    State(reconciler): State<Arc<Reconciler>>,
    Json(req): Json<ReconcileRequest>,
) -> Response {
    let result = match run(&reconciler, &req) {
        Ok(result) => result,
        Err(resp) => return resp,
    };

    match write_report_to_buffer(&result) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", REPORT_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("报告生成失败: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response()
        }
    }
}
