//! Order sessions: naming, the recording loop, and the controller that
//! ties the device, the sink and the preview together.

mod controller;
mod naming;
mod recorder;

pub use controller::{SessionConfig, SessionController, SessionError, SessionInfo, SessionStatus};
pub use naming::{output_file_name, output_path, OrderId, FILE_TIMESTAMP_FORMAT};
pub use recorder::{run_recorder, RecorderHandle, RecorderJob, RecordingSummary};
