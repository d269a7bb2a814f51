pub mod domain;
pub mod ports;

pub use domain::{TranscriptLine, TranscriptionRecord, UserProfile};
pub use ports::{PortError, PortResult, TranscriptionStore, UserStore};
