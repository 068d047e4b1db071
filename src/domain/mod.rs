pub mod endpoint;
pub mod errors;
pub mod history;
pub mod insights;
pub mod ports;
pub mod prediction;
pub mod profile;
