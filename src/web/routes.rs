use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};

pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, Html(std::include_str!("../../html/index.html")))
}

pub async fn unknown_route() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
