use crate::errors::*;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hyper::client::HttpConnector;
use hyper::header::ACCEPT;
use hyper::header::AUTHORIZATION;
use hyper::header::CONTENT_TYPE;
use hyper::header::USER_AGENT;
use hyper::Body;
use hyper::Client;
use hyper::Method;
use hyper::Request;
use hyper_tls::HttpsConnector;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use tokio::runtime::Runtime;
use url::Url;

pub struct SlClient {
    endpoint: Url,
    authorization: String,
    http: Client<HttpsConnector<HttpConnector>>,
    runtime: Runtime,
}

impl SlClient {
    pub fn new(endpoint: &str, username: &str, api_key: &str) -> Result<SlClient> {
        let endpoint =
            Url::parse(endpoint).chain_err(|| format!("invalid API endpoint: {}", endpoint))?;
        if endpoint.cannot_be_a_base() {
            bail!(ErrorKind::Config(format!("invalid API endpoint: {}", endpoint)));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .chain_err(|| "could not create runtime")?;
        let http = Client::builder().build::<_, Body>(HttpsConnector::new());
        Ok(SlClient {
            endpoint,
            authorization: basic_authorization(username, api_key),
            http,
            runtime,
        })
    }

    /// `GET {endpoint}/{service}/{id}/{method}.json`
    pub fn get<T>(&self, service: &str, id: u64, method: &str, mask: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = method_url(&self.endpoint, service, Some(id), method, mask);
        let body = self.send(Method::GET, &url, None)?;
        serde_json::from_slice(&body)
            .chain_err(|| format!("unexpected response from {}.{}", service, method))
    }

    /// `POST {endpoint}/{service}/{method}.json` with `{"parameters": [..]}`.
    pub fn call<P, T>(&self, service: &str, method: &str, parameters: &[P]) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let url = method_url(&self.endpoint, service, None, method, None);
        let body = serde_json::to_vec(&Parameters { parameters })?;
        let body = self.send(Method::POST, &url, Some(body))?;
        serde_json::from_slice(&body)
            .chain_err(|| format!("unexpected response from {}.{}", service, method))
    }

    fn send(&self, method: Method, url: &Url, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        debug!("{} {}", method, url);
        let builder = Request::builder()
            .method(method)
            .uri(url.as_str())
            .header(AUTHORIZATION, self.authorization.as_str())
            .header(ACCEPT, "application/json")
            .header(
                USER_AGENT,
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            );
        let req = match body {
            Some(bytes) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(bytes))?,
            None => builder.body(Body::empty())?,
        };

        let http = &self.http;
        let (status, body) = self
            .runtime
            .block_on(async {
                let resp = http.request(req).await?;
                let status = resp.status();
                let body = hyper::body::to_bytes(resp.into_body()).await?;
                Ok::<_, hyper::Error>((status, body))
            })
            .chain_err(|| format!("failed to contact {}", url))?;
        debug!("{} returned {}", url, status);

        if !status.is_success() {
            bail!(ErrorKind::Api(status.as_u16(), error_message(&body)));
        }
        Ok(body.to_vec())
    }
}

impl fmt::Debug for SlClient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.endpoint)
    }
}

#[derive(Serialize)]
struct Parameters<'a, P> {
    parameters: &'a [P],
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn basic_authorization(username: &str, api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, api_key)))
}

fn method_url(
    endpoint: &Url,
    service: &str,
    id: Option<u64>,
    method: &str,
    mask: Option<&str>,
) -> Url {
    let mut url = endpoint.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(service);
        if let Some(id) = id {
            segments.push(&id.to_string());
        }
        segments.push(&format!("{}.json", method));
    }
    if let Some(mask) = mask {
        url.query_pairs_mut().append_pair("objectMask", mask);
    }
    url
}

/// The service reports failures as `{"error": "...", "code": "..."}`.
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(err) => err.error,
        Err(_) => String::from_utf8_lossy(body).trim().to_owned(),
    }
}
