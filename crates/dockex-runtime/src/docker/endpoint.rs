use std::path::PathBuf;

use dockex_common::error::{DockexError, Result};
use percent_encoding::percent_decode_str;
use url::{Host, Url};

pub const DEFAULT_DOCKER_HOST: &str = "unix:///var/run/docker.sock";
const DEFAULT_TCP_PORT: u16 = 2375;

/// Where the Docker engine listens, parsed from a `DOCKER_HOST` style address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockerEndpoint {
    Unix(PathBuf),
    /// `host` is a domain name or a bare IP address, never bracketed.
    Tcp { host: String, port: u16 },
}

impl DockerEndpoint {
    pub fn parse(address: &str) -> Result<Self> {
        let address = address.trim();
        if address.is_empty() {
            return Self::parse(DEFAULT_DOCKER_HOST);
        }

        let url = Url::parse(address).map_err(|err| {
            DockexError::InvalidConfig(format!("invalid docker host {address:?}: {err}"))
        })?;

        match url.scheme() {
            "unix" => {
                let path = percent_decode_str(url.path()).decode_utf8().map_err(|err| {
                    DockexError::InvalidConfig(format!(
                        "docker host {address:?} has a non utf-8 socket path: {err}"
                    ))
                })?;
                if path.is_empty() || path == "/" {
                    return Err(DockexError::InvalidConfig(format!(
                        "docker host {address:?} has no socket path"
                    )));
                }
                Ok(Self::Unix(PathBuf::from(path.as_ref())))
            }
            "tcp" | "http" => {
                let host = match url.host() {
                    Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
                    Some(Host::Ipv4(addr)) => addr.to_string(),
                    Some(Host::Ipv6(addr)) => addr.to_string(),
                    _ => {
                        return Err(DockexError::InvalidConfig(format!(
                            "docker host {address:?} has no host"
                        )));
                    }
                };
                Ok(Self::Tcp {
                    host,
                    port: url.port().unwrap_or(DEFAULT_TCP_PORT),
                })
            }
            other => Err(DockexError::InvalidConfig(format!(
                "unsupported docker host scheme {other:?} (expected unix, tcp or http)"
            ))),
        }
    }

    /// Value for the `Host` header. The engine ignores it on a Unix socket but HTTP/1.1
    /// requires one.
    pub(crate) fn host_header(&self) -> String {
        match self {
            Self::Unix(_) => "docker".to_string(),
            Self::Tcp { host, port } => authority(host, *port),
        }
    }
}

fn authority(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

impl Default for DockerEndpoint {
    fn default() -> Self {
        Self::Unix(PathBuf::from("/var/run/docker.sock"))
    }
}

impl std::fmt::Display for DockerEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "unix://{}", path.display()),
            Self::Tcp { host, port } => write!(f, "tcp://{}", authority(host, *port)),
        }
    }
}
