use api_pipeline::{
    ClientConfig, FixedTimezone, MemoryCredentialStore, ReqwestHttpClient, RequestPipeline,
};
use httpmock::MockServer;
use std::sync::Arc;

pub const TIMEZONE: &str = "Asia/Tokyo";

pub fn create_pipeline(server: &MockServer, store: MemoryCredentialStore) -> RequestPipeline {
    let config = ClientConfig::new(&server.base_url());
    let client = ReqwestHttpClient::create(&config).unwrap();
    RequestPipeline::new(
        Arc::new(client),
        Arc::new(store),
        Arc::new(FixedTimezone(TIMEZONE.to_string())),
    )
}
