/**
 * Logout Handler
 *
 * GET /api/logout - clears the session cookie and sends the browser to the
 * public landing page. Works with or without a session.
 */

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};

use crate::backend::auth::sessions::SessionCodec;
use crate::backend::routes::pages::WELCOME_PATH;

pub async fn logout(State(sessions): State<SessionCodec>) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    sessions.clear_cookie().append_to(&mut headers);
    (headers, Redirect::to(WELCOME_PATH))
}
