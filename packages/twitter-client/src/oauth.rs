//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! Implements the signature scheme from RFC 5849 as Twitter applies it:
//! percent-encode all parameters, sort them, build the signature base
//! string from method + URL + parameter string, and sign with the
//! consumer secret and token secret. Request bodies that are not
//! form-encoded (JSON, multipart) contribute no parameters.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay literal; everything else is escaped.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per RFC 3986.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, ENCODE_SET).to_string()
}

/// The four credentials of an OAuth 1.0a user context.
#[derive(Debug, Clone)]
pub struct OAuth1Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl OAuth1Credentials {
    /// Build the `Authorization: OAuth …` header value for one request.
    ///
    /// `params` must hold every query/form parameter that will be sent
    /// with the request; `url` is the base URL without a query string.
    pub fn authorization_header(&self, method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
            .to_string();

        self.authorization_header_at(method, url, params, &nonce, &timestamp)
    }

    /// Deterministic variant with caller-supplied nonce and timestamp.
    fn authorization_header_at(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let oauth_params = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let base = signature_base_string(method, url, params, &oauth_params);
        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(&self.access_token_secret)
        );

        let mut mac =
            HmacSha1::new_from_slice(signing_key.as_bytes()).expect("HMAC accepts any key length");
        mac.update(base.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());

        // Header parameters: the oauth_* set plus the signature, sorted.
        let mut header_params: Vec<(String, String)> = oauth_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        header_params.push(("oauth_signature".to_string(), signature));
        header_params.sort();

        let joined = header_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        format!("OAuth {}", joined)
    }
}

/// Signature base string: METHOD & encoded-URL & encoded-parameter-string.
fn signature_base_string(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .chain(oauth_params.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> OAuth1Credentials {
        OAuth1Credentials {
            consumer_key: "ck".into(),
            consumer_secret: "cs".into(),
            access_token: "at".into(),
            access_token_secret: "ats".into(),
        }
    }

    #[test]
    fn test_percent_encoding_rfc3986() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("abc-._~XYZ123"), "abc-._~XYZ123");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
    }

    #[test]
    fn test_base_string_sorts_parameters() {
        let base = signature_base_string(
            "post",
            "https://api.twitter.com/2/tweets",
            &[("zeta", "1"), ("alpha", "2")],
            &[("oauth_nonce", "n"), ("oauth_consumer_key", "ck")],
        );

        assert!(base.starts_with("POST&https%3A%2F%2Fapi.twitter.com%2F2%2Ftweets&"));
        let params = base.split('&').nth(2).unwrap();
        let alpha = params.find("alpha%3D2").unwrap();
        let ck = params.find("oauth_consumer_key%3Dck").unwrap();
        let zeta = params.find("zeta%3D1").unwrap();
        assert!(alpha < ck && ck < zeta);
    }

    #[test]
    fn test_authorization_header_shape() {
        let header = creds().authorization_header_at(
            "GET",
            "https://api.twitter.com/2/users/me",
            &[],
            "fixednonce",
            "1318622958",
        );

        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"ck\""));
        assert!(header.contains("oauth_nonce=\"fixednonce\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_timestamp=\"1318622958\""));
        assert!(header.contains("oauth_token=\"at\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        assert!(header.contains("oauth_signature=\""));
    }

    #[test]
    fn test_header_is_deterministic_for_fixed_inputs() {
        let a = creds().authorization_header_at("GET", "https://example.com/r", &[], "n", "1");
        let b = creds().authorization_header_at("GET", "https://example.com/r", &[], "n", "1");
        assert_eq!(a, b);
    }
}
