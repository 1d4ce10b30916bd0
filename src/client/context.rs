/// Credentials for a single request. Passed explicitly to every call so no
/// request depends on a shared default header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn from_token(token: Option<String>) -> Self {
        Self { token }
    }

    /// Keeps an existing token, otherwise adopts `fallback`.
    pub fn or_token(self, fallback: Option<&str>) -> Self {
        if self.token.is_some() {
            return self;
        }
        match fallback {
            Some(token) => Self::bearer(token),
            None => Self::anonymous(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
