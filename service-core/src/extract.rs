//! Extractors whose rejections render through [`AppError`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor; malformed bodies become `400 {"error": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor; unparsable segments become `400 {"error": ...}`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
