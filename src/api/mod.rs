pub mod handlers;

pub use handlers::{health_check, reconcile, reconcile_report, ReconcileRequest, ReconcileResponse};

use crate::service::Reconciler;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// 构建路由
pub fn router(reconciler: Arc<Reconciler>) -> Router {
    let reconcile_routes = Router::new()
        .route("/api/reconcile", post(handlers::reconcile))
        .route("/api/reconcile/report", post(handlers::reconcile_report))
        .with_state(reconciler);

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(reconcile_routes)
        .layer(
            ServiceBuilder::new().layer(
                // 请求日志: 方法、路径、状态码、耗时
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            ),
        )
}
