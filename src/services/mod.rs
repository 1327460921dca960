pub mod enhancement_service;
pub mod remote_polish;

pub use enhancement_service::{
    EncodedEnhancement, EnhancementOutcome, EnhancementReport, EnhancementService, RemoteStatus,
};
pub use remote_polish::{
    polisher_from_config, HttpPolishClient, PolishRequest, PolishResponse, RemotePolisher,
    UnconfiguredPolisher,
};
