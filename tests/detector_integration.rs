// End-to-end detection scenarios over the public API
// WHY: Shared detector instance via OnceLock reduces per-test setup cost

use otpsift::{DetectionResult, OtpDetector};
use std::sync::OnceLock;

static SHARED_DETECTOR: OnceLock<OtpDetector> = OnceLock::new();

fn get_detector() -> &'static OtpDetector {
    SHARED_DETECTOR.get_or_init(|| {
        OtpDetector::with_default_keywords().expect("Failed to build default detector")
    })
}

fn assert_invariants(result: &DetectionResult, message: &str) {
    assert!(
        (0.0..=1.0).contains(&result.confidence),
        "confidence {} out of range for message {:?}",
        result.confidence,
        message
    );
    assert_eq!(
        result.code.is_some(),
        result.is_otp || result.is_parcel,
        "code presence must track classification for message {:?}, got {:?}",
        message,
        result
    );
}

#[test]
fn test_empty_and_blank_messages() {
    let detector = get_detector();
    for message in ["", "   \n\n   ", "\t\r\n "] {
        let result = detector.detect(message);
        assert!(!result.is_otp);
        assert!(!result.is_parcel);
        assert_eq!(result.code, None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.reason, "Empty message");
    }
}

#[test]
fn test_basic_otp_message() {
    let detector = get_detector();
    let result = detector.detect("Your OTP is 123456");
    assert!(result.is_otp, "expected OTP, got {:?}", result);
    assert_eq!(result.code.as_deref(), Some("123456"));
    assert!(result.confidence >= 0.6);
    assert_invariants(&result, "Your OTP is 123456");
}

#[test]
fn test_separated_code_is_stripped() {
    let detector = get_detector();
    let result = detector.detect("Your OTP is 123 456");
    assert_eq!(
        result.code.as_deref(),
        Some("123456"),
        "separator should be stripped, got {:?}",
        result
    );
    assert!(result.is_otp);
}

#[test]
fn test_dashed_code_is_stripped() {
    let detector = get_detector();
    let result = detector.detect("Use passcode 98-76-54 to verify your login");
    assert_eq!(result.code.as_deref(), Some("987654"));
    assert!(result.is_otp);
}

#[test]
fn test_phone_number_is_not_a_code() {
    let detector = get_detector();
    let message = "Please call +1 234 567 8900 for support";
    let result = detector.detect(message);
    assert!(!result.is_otp, "phone digits misread as OTP: {:?}", result);
    assert_eq!(result.code, None);
    assert_invariants(&result, message);
}

#[test]
fn test_money_context_suppresses_detection() {
    let detector = get_detector();
    let message = "Amount debited: Rs 123456 from your account";
    let result = detector.detect(message);
    assert!(!result.is_otp, "debit amount misread as OTP: {:?}", result);
    assert_invariants(&result, message);
}

#[test]
fn test_cjk_message_extracts_numeric_code() {
    let detector = get_detector();
    let result = detector.detect("您的验证码是 654321");
    assert!(result.is_otp, "CJK OTP message missed: {:?}", result);
    assert_eq!(result.code.as_deref(), Some("654321"));
    assert_invariants(&result, "您的验证码是 654321");
}

#[test]
fn test_cjk_adjacent_digits_without_space() {
    let detector = get_detector();
    // numeric extraction is script-agnostic; no whitespace boundary needed
    let result = detector.detect("验证码654321请勿泄露");
    assert_eq!(result.code.as_deref(), Some("654321"));
}

#[test]
fn test_alphanumeric_code() {
    let detector = get_detector();
    let result = detector.detect("Use code XK42PQ to log in");
    assert!(result.is_otp);
    assert_eq!(result.code.as_deref(), Some("XK42PQ"));
}

#[test]
fn test_safety_phrase_boosts_confidence() {
    let detector = get_detector();
    let with_safety = detector.detect("Code 4512. Do not share it with anyone");
    assert!(with_safety.is_otp);
    assert_eq!(with_safety.code.as_deref(), Some("4512"));

    let without_safety = detector.detect("Code 4512. See you there");
    assert!(
        with_safety.confidence >= without_safety.confidence,
        "safety phrase should not lower confidence: {:?} vs {:?}",
        with_safety,
        without_safety
    );
}

#[test]
fn test_parcel_pickup_message() {
    let detector = get_detector();
    let result = detector.detect("Parcel arrived: pickup code 445566 at locker");
    assert!(result.is_parcel, "parcel message missed: {:?}", result);
    assert_eq!(result.code.as_deref(), Some("445566"));
}

#[test]
fn test_parcel_code_returned_below_otp_threshold() {
    let detector = get_detector();
    let result = detector.detect("包裹到了 取件码 8877");
    assert!(!result.is_otp, "expected sub-threshold OTP: {:?}", result);
    assert!(result.is_parcel);
    assert_eq!(result.code.as_deref(), Some("8877"));
    assert!(result.confidence < 0.6);
}

#[test]
fn test_keyword_without_code() {
    let detector = get_detector();
    let result = detector.detect("Your OTP will arrive soon");
    assert!(!result.is_otp);
    assert_eq!(result.code, None);
    assert_eq!(result.confidence, 0.1);
    assert_eq!(result.reason, "Keyword present but no code found");
}

#[test]
fn test_no_keyword_no_code() {
    let detector = get_detector();
    let result = detector.detect("See you at the cafe");
    assert!(!result.is_otp);
    assert_eq!(result.code, None);
    assert_eq!(result.confidence, 0.1);
    assert_eq!(result.reason, "No OTP or parcel keyword found");
}

#[test]
fn test_idempotent_detection() {
    let detector = get_detector();
    let message = "Your OTP is 123 456. Do not share it.";
    let first = detector.detect(message);
    let second = detector.detect(message);
    assert_eq!(first, second);

    // a freshly built detector with the same lists agrees bit-for-bit
    let fresh = OtpDetector::with_default_keywords().expect("Failed to build detector");
    assert_eq!(fresh.detect(message), first);
}

#[test]
fn test_tie_breaks_toward_earlier_candidate() {
    let detector = get_detector();
    // "111" and "222" score identically; extraction order decides
    let result = detector.detect("111 and 222");
    assert!(
        result.reason.contains("'111'"),
        "expected earliest candidate to win the tie, reason: {}",
        result.reason
    );
}

#[test]
fn test_concurrent_detection_is_consistent() {
    let detector = get_detector();
    let message = "Your OTP is 123456";
    let expected = detector.detect(message);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| detector.detect(message)))
            .collect();
        for handle in handles {
            let result = handle.join().expect("detection thread panicked");
            assert_eq!(result, expected);
        }
    });
}

#[test]
fn test_adversarial_inputs_never_panic() {
    let detector = get_detector();
    let long_digits = "9".repeat(5000);
    let repeated_otp = "otp 123456 ".repeat(500);
    let dash_soup = "1-2-3-4-5-6-7-8-9-0-".repeat(200);
    let adversarial = [
        long_digits.as_str(),
        repeated_otp.as_str(),
        dash_soup.as_str(),
        "\u{0}\u{0}\u{0}",
        "🦀🔥💻 1234 🦀🔥💻",
        "ＯＴＰ １２３４５６",
        "مرحبا 123456 بالعالم",
        "+++++++++++",
        "tel tel tel call call",
        "a1 b2 c3 d4 e5 f6",
        ": = is : = is 42",
    ];
    for message in adversarial {
        let result = detector.detect(message);
        assert_invariants(&result, message);
    }
}
