//! Well-known endpoint derivation.
//!
//! All four endpoints hang off one base origin plus the application
//! namespace (e.g. `https://host:8180/tale/`). The socket endpoint upgrades
//! the scheme to the matching WebSocket variant; the rest stay on HTTP.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("base url must use http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("base url cannot be a base for relative paths")]
    CannotBeABase,
}

/// The session's four well-known endpoints, derived from one base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Build the endpoint set from the hosting origin + app namespace.
    ///
    /// The base path is normalized to end with a slash so relative joins
    /// stay inside the namespace.
    pub fn new(mut base: Url) -> Result<Self, EndpointError> {
        match base.scheme() {
            "http" | "https" => {}
            other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
        }
        if base.cannot_be_a_base() {
            return Err(EndpointError::CannotBeABase);
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Bidirectional socket endpoint, scheme-upgraded per the base scheme.
    pub fn socket(&self) -> Url {
        let mut url = self.join("ws");
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        // http->ws and https->wss are both special-to-special scheme changes,
        // which the url crate always accepts.
        let _ = url.set_scheme(scheme);
        url
    }

    /// One-way server-push fallback endpoint.
    pub fn push_stream(&self) -> Url {
        self.join("eventsource")
    }

    /// HTTP command submission endpoint (hybrid/push-only mode).
    pub fn command(&self) -> Url {
        self.join("input")
    }

    /// Plain navigation target that ends the session.
    pub fn quit(&self) -> Url {
        self.join("quit")
    }

    fn join(&self, leaf: &str) -> Url {
        // Base is validated in `new`; joining a plain segment cannot fail.
        self.base.join(leaf).unwrap_or_else(|_| self.base.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(base: &str) -> Endpoints {
        Endpoints::new(Url::parse(base).expect("parse base")).expect("valid base")
    }

    #[test]
    fn socket_upgrades_scheme_to_match_page_scheme() {
        let plain = endpoints("http://localhost:8180/tale/");
        assert_eq!(plain.socket().as_str(), "ws://localhost:8180/tale/ws");

        let secure = endpoints("https://game.example/tale/");
        assert_eq!(secure.socket().as_str(), "wss://game.example/tale/ws");
    }

    #[test]
    fn http_endpoints_stay_on_the_base_scheme() {
        let eps = endpoints("https://game.example/tale/");
        assert_eq!(
            eps.push_stream().as_str(),
            "https://game.example/tale/eventsource"
        );
        assert_eq!(eps.command().as_str(), "https://game.example/tale/input");
        assert_eq!(eps.quit().as_str(), "https://game.example/tale/quit");
    }

    #[test]
    fn base_path_is_normalized_with_trailing_slash() {
        let eps = endpoints("http://localhost:8180/tale");
        assert_eq!(eps.command().as_str(), "http://localhost:8180/tale/input");
    }

    #[test]
    fn rejects_non_http_bases() {
        let err = Endpoints::new(Url::parse("ftp://host/tale/").expect("parse"))
            .expect_err("ftp base must be rejected");
        assert!(matches!(err, EndpointError::UnsupportedScheme(s) if s == "ftp"));
    }
}
