pub mod message;
pub mod profile;
pub mod scan;

pub use message::FlaggedMessage;
pub use profile::{SourceKind, SourceProfile};
pub use scan::ScanOutcome;
