//! Daemon address parsing for `--server`

use std::fmt;
use std::str::FromStr;

use gearadmin_client::DEFAULT_PORT;

/// `host` or `host:port`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    pub host: String,
    pub port: u16,
}

impl FromStr for ServerAddr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty server address".to_string());
        }

        // Bracketed IPv6, e.g. [::1]:4730
        if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| format!("unclosed '[' in {:?}", s))?;
            let port = match tail.strip_prefix(':') {
                Some(port) => parse_port(port)?,
                None if tail.is_empty() => DEFAULT_PORT,
                None => return Err(format!("unexpected {:?} after address", tail)),
            };
            return Ok(Self {
                host: host.to_string(),
                port,
            });
        }

        match s.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') => Ok(Self {
                host: host.to_string(),
                port: parse_port(port)?,
            }),
            _ => Ok(Self {
                host: s.to_string(),
                port: DEFAULT_PORT,
            }),
        }
    }
}

fn parse_port(port: &str) -> Result<u16, String> {
    port.parse()
        .map_err(|_| format!("invalid port {:?}", port))
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
