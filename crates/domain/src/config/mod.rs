//! Configuration types for the analysis engine, organized by concern:
//! - `analysis`: supported algorithms, trust anchors, the analysis instant
//! - `serialization`: output depth, severity gate, HTML formatting
//! - `logging`: level string for a host binary's subscriber

pub mod analysis;
pub mod logging;
pub mod serialization;

pub use analysis::{AnalysisConfig, TrustAnchorConfig};
pub use logging::{init_logging, LoggingConfig};
pub use serialization::{LogLevel, SerializationConfig, SerializedLevel};
