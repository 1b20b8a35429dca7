mod endpoint;
mod wire;

use async_trait::async_trait;
use bytes::Bytes;
use dockex_common::error::{DockexError, Result};
use http::{Method, Request, header};
use http_body_util::{BodyExt, Empty};
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, warn};

pub use endpoint::{DEFAULT_DOCKER_HOST, DockerEndpoint};

use crate::{
    traits::ContainerRuntime,
    types::{ContainerSnapshot, StatsSample, VolumeSnapshot},
};

const USER_AGENT: &str = concat!("dockex/", env!("CARGO_PKG_VERSION"));

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Docker Engine API client.
///
/// Every request opens its own connection, so one client can be shared by any number of
/// concurrent tasks without coordination.
#[derive(Debug, Clone)]
pub struct DockerClient {
    endpoint: DockerEndpoint,
}

impl DockerClient {
    pub fn new(endpoint: DockerEndpoint) -> Self {
        Self { endpoint }
    }

    pub fn from_host(address: &str) -> Result<Self> {
        Ok(Self::new(DockerEndpoint::parse(address)?))
    }

    pub fn endpoint(&self) -> &DockerEndpoint {
        &self.endpoint
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.get(path).await?;
        serde_json::from_slice(&body).map_err(|err| DockexError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        })
    }

    async fn get(&self, path: &str) -> Result<Bytes> {
        debug!(endpoint = %self.endpoint, path, "docker api request");

        match &self.endpoint {
            #[cfg(unix)]
            DockerEndpoint::Unix(socket) => {
                let stream = tokio::net::UnixStream::connect(socket)
                    .await
                    .map_err(|err| self.connect_error(err))?;
                self.send(stream, path).await
            }
            #[cfg(not(unix))]
            DockerEndpoint::Unix(_) => Err(DockexError::InvalidConfig(
                "unix socket docker hosts are not supported on this platform".to_string(),
            )),
            DockerEndpoint::Tcp { host, port } => {
                let stream = tokio::net::TcpStream::connect((host.as_str(), *port))
                    .await
                    .map_err(|err| self.connect_error(err))?;
                self.send(stream, path).await
            }
        }
    }

    async fn send<S>(&self, stream: S, path: &str) -> Result<Bytes>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (mut sender, connection) = http1::handshake(TokioIo::new(stream))
            .await
            .map_err(|err| {
                DockexError::Transport(format!("handshake with {} failed: {err}", self.endpoint))
            })?;

        let endpoint = self.endpoint.to_string();
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                warn!(endpoint = %endpoint, error = %err, "failed to close docker connection");
            }
        });

        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(header::HOST, self.endpoint.host_header())
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|err| DockexError::InternalError(format!("invalid request {path}: {err}")))?;

        let response = sender.send_request(request).await.map_err(|err| {
            DockexError::Transport(format!("request {path} to {} failed: {err}", self.endpoint))
        })?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|err| {
                DockexError::Transport(format!("failed to read response body for {path}: {err}"))
            })?
            .to_bytes();

        if !status.is_success() {
            return Err(DockexError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(body)
    }

    fn connect_error(&self, err: std::io::Error) -> DockexError {
        DockexError::Transport(format!("failed to connect to {}: {err}", self.endpoint))
    }
}

#[async_trait]
impl ContainerRuntime for DockerClient {
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSnapshot>> {
        let path = if all {
            "/containers/json?all=1"
        } else {
            "/containers/json"
        };
        let summaries: Vec<wire::ContainerSummary> = self.get_json(path).await?;
        Ok(summaries.into_iter().map(ContainerSnapshot::from).collect())
    }

    async fn disk_usage(&self) -> Result<Vec<VolumeSnapshot>> {
        let usage: wire::DiskUsage = self.get_json("/system/df?type=volume").await?;
        Ok(usage.volumes.into_iter().map(VolumeSnapshot::from).collect())
    }

    async fn container_stats(&self, container_id: &str) -> Result<StatsSample> {
        let path = format!(
            "/containers/{}/stats?stream=false",
            utf8_percent_encode(container_id, PATH_SEGMENT)
        );
        let response: wire::StatsResponse = self.get_json(&path).await?;
        Ok(response.into())
    }
}

/// The engine reports failures as `{"message": "..."}`; anything else is passed through.
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<wire::ErrorMessage>(body) {
        Ok(error) => error.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}
