use ::http::Extensions;
use reqwest::{Client, Request, Response};
use reqwest_middleware::{
    ClientBuilder, ClientWithMiddleware, Middleware, Next, Result as MwResult,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Logs one line per request: method, URL, status and elapsed time.
///
/// Header values are never logged; the `Authorization` header carries the session token.
struct RequestLogger;

#[async_trait::async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> MwResult<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        let authenticated = req.headers().contains_key(reqwest::header::AUTHORIZATION);
        let t0 = Instant::now();
        debug!(%method, %url, authenticated, "→ sending request");

        let res = next.run(req, extensions).await;

        let elapsed_ms = t0.elapsed().as_millis() as u64;
        match &res {
            Ok(resp) => info!(
                %method,
                %url,
                status = resp.status().as_u16(),
                elapsed_ms,
                "✔ response received"
            ),
            Err(err) => warn!(%method, %url, elapsed_ms, error = %err, "✖ request failed"),
        }
        res
    }
}

/// Wrap a configured reqwest client with request logging. No retry layer:
/// every call is attempted exactly once.
pub fn build_client_with_logging(reqwest_client: Client) -> ClientWithMiddleware {
    ClientBuilder::new(reqwest_client)
        .with(RequestLogger)
        .build()
}
