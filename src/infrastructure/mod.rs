pub mod core;
pub mod http_transport;
pub mod mock;
pub mod observability;

pub use http_transport::ReqwestTransport;
pub use mock::MockTransport;
