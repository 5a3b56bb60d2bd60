use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` body extractor whose rejections render as `{"error": ..}` with 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
