use crate::error::TransportError;
use crate::model::{Request, Response};
use async_trait::async_trait;


pub mod reqwest;

/// The transport under the pipeline.
///
/// Any HTTP response, whatever its status, is `Ok`. `Err` means no response
/// was received at all.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, TransportError>;
}
