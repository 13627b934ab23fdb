//! Response helpers shared by the HTML handlers.

use askama::Template;
use axum::response::{Html, Redirect};

use crate::error::AppError;
use crate::extractors::Notice;

/// Render a template into an HTML response body.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// 303 redirect to `path`, announcing `notice` on the next page.
pub fn redirect_with(path: &str, notice: Notice) -> Redirect {
    Redirect::to(&notice.attach(path))
}
