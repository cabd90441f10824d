use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::manager_openweather::errors::FetchError;

/// Minimal HTTP transport used by the weather fetcher
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issues a GET request and returns the body together with the status code
    ///
    /// # Arguments
    ///
    /// * 'url' - full request url
    async fn load(&self, url: &str) -> Result<(Vec<u8>, u16), FetchError>;
}

pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Returns a transport backed by reqwest
    ///
    /// # Arguments
    ///
    /// * 'timeout' - timeout for every request
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn load(&self, url: &str) -> Result<(Vec<u8>, u16), FetchError> {
        let res = self.client
            .get(url)
            .send().await?;

        let status = res.status().as_u16();
        let body = res.bytes().await?;

        Ok((body.to_vec(), status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_returns_body_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();
        let (body, status) = client.load(&format!("{}/weather", server.uri())).await.unwrap();

        assert_eq!(status, 404);
        assert_eq!(body, b"nope".to_vec());
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();
        let res = client.load("http://127.0.0.1:1/weather").await;

        assert!(matches!(res, Err(FetchError::Transport(_))));
    }
}
