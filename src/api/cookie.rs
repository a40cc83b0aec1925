use chrono::{DateTime, NaiveDateTime, Utc};

/// Name of the session cookie set by `POST /auth/login`
pub const SESSION_COOKIE: &str = "sid";

/// What a single `Set-Cookie` header means for the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCookie {
    Set(String),
    Cleared,
}

/// Parse one `Set-Cookie` header value. Returns None for other cookies.
pub fn parse_set_cookie(header: &str) -> Option<SessionCookie> {
    parse_set_cookie_at(header, Utc::now())
}

/// Same as [`parse_set_cookie`], judging `Expires` against `now`.
/// `Max-Age` wins over `Expires` when both are present.
pub fn parse_set_cookie_at(header: &str, now: DateTime<Utc>) -> Option<SessionCookie> {
    let mut parts = header.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    if name.trim() != SESSION_COOKIE {
        return None;
    }

    let value = value.trim().trim_matches('"');
    if value.is_empty() {
        return Some(SessionCookie::Cleared);
    }

    let mut max_age = None;
    let mut expires = None;
    for attr in parts {
        let Some((key, val)) = attr.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.eq_ignore_ascii_case("max-age") {
            max_age = val.trim().parse::<i64>().ok();
        } else if key.eq_ignore_ascii_case("expires") {
            expires = parse_cookie_date(val.trim());
        }
    }

    let expired = match (max_age, expires) {
        (Some(age), _) => age <= 0,
        (None, Some(at)) => at <= now,
        (None, None) => false,
    };

    if expired {
        Some(SessionCookie::Cleared)
    } else {
        Some(SessionCookie::Set(value.to_string()))
    }
}

/// `Thu, 01 Jan 1970 00:00:00 GMT`, or the older dashed form
fn parse_cookie_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc2822(value) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%a, %d-%b-%Y %H:%M:%S GMT")
        .ok()
        .map(|at| at.and_utc())
}

pub fn cookie_header(sid: &str) -> String {
    format!("{}={}", SESSION_COOKIE, sid)
}
