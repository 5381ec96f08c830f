use async_trait::async_trait;
use reqwest::{Request, Response};

/// Transport seam for remote sources; lets callers swap in their own client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
