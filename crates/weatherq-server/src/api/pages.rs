//! The two page shells the browser client binds to. Both are static; all
//! weather content arrives through `/weather`.

use axum::response::Html;

const MAIN_PAGE: &str = include_str!("../../assets/index.html");
const ADD_PAGE: &str = include_str!("../../assets/add.html");

/// Slider page: current location plus saved cities as swipeable cards.
pub(super) async fn main_page() -> Html<&'static str> {
    Html(MAIN_PAGE)
}

/// List page: search box and removable saved cities.
pub(super) async fn add_page() -> Html<&'static str> {
    Html(ADD_PAGE)
}
