// handlers/public/pages.rs - page routes
//
// The browser front-end is not part of this service. Each page route answers
// with a minimal document so links and redirects resolve.

use axum::{extract::Path, response::Html};

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title} | Travelog</title></head>\n<body><h1>{title}</h1>{body}</body></html>\n"
    ))
}

pub async fn home_page() -> Html<String> {
    page("Travelog", "<p><a href=\"/addplace\">Add a place</a></p>")
}

pub async fn add_place_page() -> Html<String> {
    page("Add a place", "")
}

pub async fn edit_place_page(Path(id): Path<String>) -> Html<String> {
    page("Edit place", &format!("<p data-place-id=\"{}\"></p>", escape(&id)))
}

pub async fn view_place_page(Path(id): Path<String>) -> Html<String> {
    page("View place", &format!("<p data-place-id=\"{}\"></p>", escape(&id)))
}

pub async fn signup_page() -> Html<String> {
    page("Sign up", "")
}

pub async fn login_page() -> Html<String> {
    page("Log in", "")
}

fn escape(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '&' => "&amp;".to_string(),
            '\'' => "&#39;".to_string(),
            c => c.to_string(),
        })
        .collect()
}
