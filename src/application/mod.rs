pub mod batch;
pub mod prediction_client;
pub mod session;

pub use batch::{BatchReport, LineFailure, replay_lines};
pub use prediction_client::PredictionClient;
pub use session::{PredictionSession, SubmissionState};
