use std::fmt;

use reqwest::header::HeaderValue;

use crate::{Error, logging::mask_secret};

/// Opaque bearer credential issued by BitGo.
///
/// Tokens are valid for a limited time and are bound to the IP address they were issued to.
/// Formatting a token never prints the credential itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the `Authorization` header value for this token.
    ///
    /// An empty token counts as no token at all and yields `None`, so the request goes out
    /// anonymously.
    pub(crate) fn bearer_header(&self) -> Result<Option<HeaderValue>, Error> {
        if self.0.is_empty() {
            return Ok(None);
        }
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0)).map_err(|_| {
            Error::InvalidAccessToken("access token contains characters not allowed in a header".to_string())
        })?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&AccessToken> for AccessToken {
    fn from(token: &AccessToken) -> Self {
        token.clone()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&mask_secret(&self.0)).finish()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_secret(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_compare_by_value() {
        assert_eq!(AccessToken::from("abc"), AccessToken::new(String::from("abc")));
        assert_ne!(AccessToken::from("abc"), AccessToken::from("abd"));
    }

    #[test]
    fn bearer_header_wraps_the_token() {
        let header = AccessToken::from("v2x0123456789").bearer_header().unwrap().unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer v2x0123456789");
        assert!(header.is_sensitive());
    }

    #[test]
    fn empty_token_means_anonymous() {
        assert!(AccessToken::from("").bearer_header().unwrap().is_none());
    }

    #[test]
    fn whitespace_tokens_are_sent_unchanged() {
        let header = AccessToken::from("  ").bearer_header().unwrap().unwrap();
        assert_eq!(header.as_bytes(), b"Bearer   ");
    }

    #[test]
    fn unusable_tokens_are_rejected() {
        for raw in ["abc\ndef", "tab\u{7f}", "nul\0"] {
            let err = AccessToken::from(raw).bearer_header().unwrap_err();
            assert!(matches!(err, Error::InvalidAccessToken(_)), "{raw:?}");
        }
    }

    #[test]
    fn formatting_masks_the_credential() {
        let token = AccessToken::from("v2xdeadbeefcafebabe0123456789");
        let printed = format!("{token} {token:?}");
        assert!(!printed.contains("deadbeefcafebabe"));
    }
}
