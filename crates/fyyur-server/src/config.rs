use axum::http::{HeaderValue, Method};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// HTTP listener and CORS settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Public host[:port], used as the same-origin CORS origin.
    pub domain: String,
    pub scheme: String,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = env::var("FYYUR_HOST")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = env::var("FYYUR_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            host,
            port,
            domain: env::var("FYYUR_DOMAIN").unwrap_or_else(|_| "localhost:8080".to_string()),
            scheme: env::var("FYYUR_SCHEME").unwrap_or_else(|_| "http".to_string()),
            cors_origins: parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default()),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let methods = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ];
        let allow_origin = if self.cors_origins.is_empty() {
            let origin = format!("{}://{}", self.scheme, self.domain);
            tracing::warn!(%origin, "CORS_ORIGINS not set, allowing same origin only");
            AllowOrigin::exact(
                HeaderValue::from_str(&origin)
                    .unwrap_or_else(|_| HeaderValue::from_static("http://localhost")),
            )
        } else {
            let origins: Vec<HeaderValue> = self
                .cors_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok())
                .collect();
            tracing::info!("CORS allowed origins: {:?}", origins);
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(methods)
            .allow_headers(Any)
    }
}

/// Comma-separated origins; blanks are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://fyyur.example.com,,"),
            vec!["http://localhost:3000", "https://fyyur.example.com"]
        );
        assert!(parse_origins("").is_empty());
        assert!(parse_origins(" , ").is_empty());
    }

    #[test]
    fn test_addr() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            domain: "localhost:5000".into(),
            scheme: "http".into(),
            cors_origins: vec![],
        };
        assert_eq!(config.addr().to_string(), "127.0.0.1:5000");
    }
}
