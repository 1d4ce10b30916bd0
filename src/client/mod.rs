pub mod api_client;
pub mod context;

pub use api_client::ApiClient;
pub use context::RequestContext;
