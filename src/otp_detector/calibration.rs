// WHY: calibration is the only place raw scores become user-facing belief,
// so the normalizer, boosts, and threshold live here as named constants

/// Divisor that maps the practical score range onto [0,1].
pub(crate) const SCORE_NORMALIZER: f64 = 8.0;

/// Additive confidence boost per message-level boolean flag.
pub(crate) const FLAG_BOOST: f64 = 0.15;

/// Calibrated confidence at or above this value classifies as OTP.
pub(crate) const OTP_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Message-level boolean flags computed once per `detect` call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MessageFlags {
    pub has_otp_keyword: bool,
    pub has_safety_keyword: bool,
    pub has_cjk_otp_indicator: bool,
    pub is_parcel: bool,
}

/// Reduce the winning score and message flags to a calibrated confidence in
/// [0,1] and the binary OTP decision.
pub(crate) fn calibrate(score: f64, flags: &MessageFlags) -> (f64, bool) {
    let raw = (score / SCORE_NORMALIZER).clamp(0.0, 1.0);
    let mut boost = 0.0;
    if flags.has_otp_keyword || flags.has_cjk_otp_indicator {
        boost += FLAG_BOOST;
    }
    if flags.has_safety_keyword {
        boost += FLAG_BOOST;
    }
    if flags.is_parcel {
        boost += FLAG_BOOST;
    }
    let confidence = (raw + boost).clamp(0.0, 1.0);
    (confidence, confidence >= OTP_CONFIDENCE_THRESHOLD)
}
