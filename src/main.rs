use anyhow::Result;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use otpsift::{DetectionResult, OtpDetector};

#[derive(Parser, Debug)]
#[command(name = "otpsift")]
#[command(about = "Detects OTP and parcel-pickup codes in SMS/MMS message text")]
#[command(version)]
struct Args {
    /// Message text to scan; reads stdin when omitted
    message: Option<String>,

    /// Scan each non-empty line of FILE as a separate message
    #[arg(long, value_name = "FILE", conflicts_with = "message")]
    file: Option<PathBuf>,

    /// Emit results as JSON instead of tab-separated text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // WHY: structured JSON logging enables observability when run under a host
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let args = Args::parse();
    let detector = OtpDetector::with_default_keywords()?;

    if let Some(path) = args.file {
        if !path.exists() {
            anyhow::bail!("Input file does not exist: {}", path.display());
        }
        let content = std::fs::read_to_string(&path)?;
        let mut scanned = 0usize;
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let result = detector.detect(line);
            if args.json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!("{}", format_detection_output(index, &result));
            }
            scanned += 1;
        }
        info!("Scanned {} messages from {}", scanned, path.display());
        return Ok(());
    }

    let message = match args.message {
        Some(message) => message,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let result = detector.detect(&message);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_detection_output(0, &result));
    }
    Ok(())
}

/// Tab-separated single-line rendering: index, classification, code,
/// confidence, reason.
fn format_detection_output(index: usize, result: &DetectionResult) -> String {
    let label = if result.is_otp {
        "otp"
    } else if result.is_parcel {
        "parcel"
    } else {
        "none"
    };
    format!(
        "{}\t{}\t{}\t{:.2}\t{}",
        index,
        label,
        result.code.as_deref().unwrap_or("-"),
        result.confidence,
        result.reason
    )
}
