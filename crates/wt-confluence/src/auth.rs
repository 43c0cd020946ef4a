//! Authorization header encoding.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use wt_config::Credentials;

/// Encode credentials into an `Authorization` header value.
///
/// Basic credentials become `Basic {base64("username:secret")}`; a personal
/// access token becomes `Bearer {secret}`. Encoding is deterministic and
/// infallible. The secret must not contain control characters, which would
/// make the header value invalid at the HTTP layer.
pub fn auth_header(credentials: &Credentials) -> String {
    match credentials {
        Credentials::Basic { username, secret } => {
            let encoded = BASE64_STANDARD.encode(format!("{username}:{secret}"));
            format!("Basic {encoded}")
        }
        Credentials::Bearer { secret } => format!("Bearer {secret}"),
    }
}
