use std::time::Duration;

use http::HeaderMap;
use http::header::{COOKIE, HeaderValue};

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    max_age: Duration,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, max_age: Duration, secure: bool) -> Self {
        Self {
            name: name.into(),
            max_age,
            secure,
        }
    }

    /// `Set-Cookie` value carrying the token
    pub fn issue(&self, token: &str) -> Option<HeaderValue> {
        self.header(token, self.max_age.as_secs())
    }

    /// `Set-Cookie` value that expires the session immediately
    pub fn clear(&self) -> Option<HeaderValue> {
        self.header("", 0)
    }

    fn header(&self, value: &str, max_age: u64) -> Option<HeaderValue> {
        let mut cookie = format!("{}={value}; Max-Age={max_age}; Path=/; HttpOnly; SameSite=Lax", self.name);
        if self.secure {
            cookie.push_str("; Secure");
        }

        HeaderValue::from_str(&cookie).ok()
    }

    /// Find the session token among the request's `Cookie` headers
    pub fn read<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.name)
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie() -> SessionCookie {
        SessionCookie::new("jwt_token", Duration::from_secs(3600), false)
    }

    #[test]
    fn issued_cookie_attributes() {
        let value = cookie().issue("abc.def.ghi").unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "jwt_token=abc.def.ghi; Max-Age=3600; Path=/; HttpOnly; SameSite=Lax"
        );

        let secure = SessionCookie::new("jwt_token", Duration::from_secs(60), true);
        assert!(secure.issue("t").unwrap().to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn cleared_cookie_expires_now() {
        let value = cookie().clear().unwrap();
        assert!(value.to_str().unwrap().starts_with("jwt_token=; Max-Age=0;"));
    }

    #[test]
    fn token_is_read_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("lang=en; jwt_token=abc.def.ghi"));

        assert_eq!(cookie().read(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_or_empty_token_reads_as_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(cookie().read(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("jwt_token="));
        assert_eq!(cookie().read(&headers), None);
    }
}
