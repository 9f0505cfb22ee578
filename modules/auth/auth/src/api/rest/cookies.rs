//! The short-lived `<provider>-nonce` cookie that binds an OAuth callback to
//! the browser that started the flow.

use http::HeaderMap;
use http::header::COOKIE;

const NONCE_MAX_AGE_SECS: u32 = 600;

#[derive(Debug, Clone, Copy)]
pub struct NonceCookie {
    pub secure: bool,
}

impl NonceCookie {
    #[must_use]
    pub fn name(provider_id: &str) -> String {
        format!("{provider_id}-nonce")
    }

    /// `Set-Cookie` value storing `nonce`, scoped to the provider's handler path.
    #[must_use]
    pub fn set(self, provider_id: &str, nonce: &str) -> String {
        self.render(provider_id, nonce, NONCE_MAX_AGE_SECS)
    }

    /// `Set-Cookie` value that expires the nonce.
    #[must_use]
    pub fn clear(self, provider_id: &str) -> String {
        self.render(provider_id, "", 0)
    }

    fn render(self, provider_id: &str, value: &str, max_age: u32) -> String {
        let name = Self::name(provider_id);
        let secure = if self.secure { "; Secure" } else { "" };
        format!(
            "{name}={value}; Path=/api/auth/{provider_id}/handler; Max-Age={max_age}; HttpOnly; SameSite=Lax{secure}"
        )
    }

    /// Nonce sent back by the browser, if any.
    #[must_use]
    pub fn read(headers: &HeaderMap, provider_id: &str) -> Option<String> {
        let name = Self::name(provider_id);
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_owned())
    }
}
