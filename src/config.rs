//! Connection configuration.

use crate::error::{Error, Result};

/// Default native protocol port.
pub const DEFAULT_PORT: u16 = 9042;

const SCHEME: &str = "cassandra://";

/// Parameters for opening a bridge connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Contact points.
    pub hosts: Vec<String>,
    /// Port shared by all contact points.
    pub port: u16,
    /// Initial current schema.
    pub keyspace: Option<String>,
    /// Overrides the synthetic catalog name.
    pub catalog: Option<String>,
    /// Reported user name; credentials are handled by the store client.
    pub user: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl BridgeConfig {
    /// Create a config for a single host on the default port.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            hosts: vec![host.into()],
            port: DEFAULT_PORT,
            keyspace: None,
            catalog: None,
            user: None,
            log_level: None,
            log_file: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = Some(keyspace.into());
        self
    }

    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_log_file(mut self, path: impl Into<String>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Parse a URL like `jdbc:cassandra://host1,host2:9042/keyspace?catalog=Prod`.
    ///
    /// The `jdbc:` prefix is optional. Recognized query keys are `catalog`,
    /// `user`, `loglevel` and `logfile`; unknown keys are ignored.
    pub fn parse(url: &str) -> Result<Self> {
        let rest = url.strip_prefix("jdbc:").unwrap_or(url);
        let rest = rest
            .strip_prefix(SCHEME)
            .ok_or_else(|| Error::InvalidConnectString {
                message: "Expected format: jdbc:cassandra://host[:port][/keyspace]".to_string(),
            })?;

        let (location, query) = match rest.split_once('?') {
            Some((l, q)) => (l, Some(q)),
            None => (rest, None),
        };
        let (authority, keyspace) = match location.split_once('/') {
            Some((a, k)) => (a, Some(k).filter(|k| !k.is_empty())),
            None => (location, None),
        };

        let (hosts_part, port) = match authority.rsplit_once(':') {
            Some((h, p)) => {
                let port = p.parse::<u16>().map_err(|_| Error::InvalidConnectString {
                    message: format!("Invalid port: {}", p),
                })?;
                (h, port)
            }
            None => (authority, DEFAULT_PORT),
        };

        let hosts: Vec<String> = hosts_part
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(String::from)
            .collect();
        if hosts.is_empty() {
            return Err(Error::InvalidConnectString {
                message: "Missing host".to_string(),
            });
        }

        let mut config = Self {
            hosts,
            port,
            keyspace: keyspace.map(String::from),
            catalog: None,
            user: None,
            log_level: None,
            log_file: None,
        };

        for pair in query.into_iter().flat_map(|q| q.split('&')) {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').ok_or_else(|| Error::InvalidConnectString {
                message: format!("Invalid parameter: {}", pair),
            })?;
            match key.to_ascii_lowercase().as_str() {
                "catalog" => config.catalog = Some(value.to_string()),
                "user" => config.user = Some(value.to_string()),
                "loglevel" => config.log_level = Some(value.to_string()),
                "logfile" => config.log_file = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(config)
    }

    /// Connection URL in the form [`parse`](Self::parse) accepts.
    ///
    /// Logging keys are left out.
    pub fn url(&self) -> String {
        let mut url = format!("jdbc:{}{}:{}", SCHEME, self.hosts.join(","), self.port);
        if let Some(keyspace) = &self.keyspace {
            url.push('/');
            url.push_str(keyspace);
        }
        let query: Vec<String> = [("catalog", &self.catalog), ("user", &self.user)]
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", key, v)))
            .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let config =
            BridgeConfig::parse("jdbc:cassandra://localhost:9160/demo?catalog=Prod&loglevel=debug")
                .unwrap();
        assert_eq!(config.hosts, vec!["localhost"]);
        assert_eq!(config.port, 9160);
        assert_eq!(config.keyspace.as_deref(), Some("demo"));
        assert_eq!(config.catalog.as_deref(), Some("Prod"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_parse_defaults() {
        let config = BridgeConfig::parse("cassandra://db1,db2").unwrap();
        assert_eq!(config.hosts, vec!["db1", "db2"]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.keyspace, None);

        let config = BridgeConfig::parse("jdbc:cassandra://db1/").unwrap();
        assert_eq!(config.keyspace, None);
    }

    #[test]
    fn test_url_round_trips_through_parse() {
        let config = BridgeConfig::new("db1")
            .with_keyspace("demo")
            .with_catalog("Prod")
            .with_user("alice");
        assert_eq!(config.url(), "jdbc:cassandra://db1:9042/demo?catalog=Prod&user=alice");
        assert_eq!(BridgeConfig::parse(&config.url()).unwrap(), config);

        let bare = BridgeConfig::parse("cassandra://db1,db2").unwrap();
        assert_eq!(bare.url(), "jdbc:cassandra://db1,db2:9042");
    }

    #[test]
    fn test_parse_invalid() {
        for url in [
            "jdbc:mysql://localhost",
            "jdbc:cassandra://localhost:abc",
            "jdbc:cassandra:///ks",
            "jdbc:cassandra://localhost?catalog",
        ] {
            assert!(
                matches!(BridgeConfig::parse(url), Err(Error::InvalidConnectString { .. })),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_builder() {
        let config = BridgeConfig::new("localhost")
            .with_port(9043)
            .with_keyspace("ks")
            .with_catalog("Cluster1");
        assert_eq!(config.port, 9043);
        assert_eq!(config.keyspace.as_deref(), Some("ks"));
        assert_eq!(config.catalog.as_deref(), Some("Cluster1"));
    }
}
