//! Response type returned by controller actions

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::serializer::Serialized;

/// A serialized controller result
///
/// - [`ApiResponse::ok`]: 200 with a body
/// - [`ApiResponse::created`]: 201 with a body
/// - [`ApiResponse::no_content`]: 204, empty body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: StatusCode,
    content: Option<Serialized>,
}

impl ApiResponse {
    /// 200 OK carrying a serialized payload
    pub fn ok(content: Serialized) -> Self {
        Self {
            status: StatusCode::OK,
            content: Some(content),
        }
    }

    /// 201 Created carrying the serialized new entity
    pub fn created(content: Serialized) -> Self {
        Self {
            status: StatusCode::CREATED,
            content: Some(content),
        }
    }

    /// 204 No Content
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            content: None,
        }
    }

    /// Response status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response body, empty for `no_content`
    pub fn body(&self) -> &[u8] {
        match &self.content {
            Some(content) => &content.body,
            None => &[],
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.content {
            Some(content) => (
                self.status,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(content.content_type),
                )],
                content.body,
            )
                .into_response(),
            None => self.status.into_response(),
        }
    }
}
