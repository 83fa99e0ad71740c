use axum::extract::Request;
use axum::http::HeaderValue;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Cookie carrying the browser's chat session id.
pub const SESSION_COOKIE: &str = "session_id";

/// Human-readable word prefixes for generated session ids.
const SESSION_WORDS: [&str; 13] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliet",
    "kilo", "lima", "mike",
];

/// Ensures every browser has a session id cookie, refreshing it on each
/// response to keep the session alive.
pub async fn session_cookie(req: Request, next: Next) -> Response {
    let session_id = cookie_value(&req, SESSION_COOKIE)
        .map(str::to_string)
        .unwrap_or_else(generate_session_id);

    let mut response = next.run(req).await;

    let cookie =
        format!("{SESSION_COOKIE}={session_id}; Max-Age=1800; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

/// Builds a readable session id: a NATO-alphabet word plus a UUID, the
/// word picked from the UUID's first byte.
pub fn generate_session_id() -> String {
    let id = Uuid::new_v4();
    let word = SESSION_WORDS[id.as_bytes()[0] as usize % SESSION_WORDS.len()];
    format!("web-{word}-{id}")
}

fn cookie_value<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers()
        .get(COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}
