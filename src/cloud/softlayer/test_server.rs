use hyper::header::AUTHORIZATION;
use hyper::service::make_service_fn;
use hyper::service::service_fn;
use hyper::Body;
use hyper::Request;
use hyper::Response;
use hyper::Server;
use hyper::StatusCode;
use std::convert::Infallible;
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Answers every request on a loopback port with one canned response and
/// keeps what it received.
pub struct TestServer {
    endpoint: String,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl TestServer {
    pub fn start(status: StatusCode, body: &'static str) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/rest/v3.1", listener.local_addr().unwrap());
        let received = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&received);
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let make_service = make_service_fn(move |_| {
                    let log = Arc::clone(&log);
                    async move {
                        Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
                            let log = Arc::clone(&log);
                            async move {
                                let method = req.method().to_string();
                                let path = req
                                    .uri()
                                    .path_and_query()
                                    .map(|p| p.to_string())
                                    .unwrap_or_default();
                                let authorization = req
                                    .headers()
                                    .get(AUTHORIZATION)
                                    .and_then(|value| value.to_str().ok())
                                    .map(str::to_owned);
                                let bytes = hyper::body::to_bytes(req.into_body()).await?;
                                log.lock().unwrap().push(ReceivedRequest {
                                    method,
                                    path,
                                    authorization,
                                    body: String::from_utf8_lossy(&bytes).into_owned(),
                                });
                                Ok::<_, hyper::Error>(
                                    Response::builder()
                                        .status(status)
                                        .body(Body::from(body))
                                        .unwrap(),
                                )
                            }
                        }))
                    }
                });
                Server::from_tcp(listener)
                    .unwrap()
                    .serve(make_service)
                    .await
                    .unwrap();
            });
        });

        TestServer { endpoint, received }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}
