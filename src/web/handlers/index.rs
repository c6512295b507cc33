// GET /: the empty prompt page.

use axum::response::Html;

use crate::web::render::{render, Page};

pub async fn index() -> Html<String> {
    Html(render(&Page::Prompt))
}
