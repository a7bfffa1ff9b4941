pub mod otp_detector;

// Re-export main types for convenient access
pub use otp_detector::{
    DetectionResult, ErrorKind, KeywordProvider, OtpDetector, StaticKeywordProvider,
};
