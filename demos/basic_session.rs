//! Basic session example demonstrating the scan workflow end to end.
//!
//! This example shows how to:
//! - Build a SessionController over a scripted backend
//! - Subscribe to session events
//! - Drive a scan to completion and render the findings
//!
//! Run with: cargo run --example basic_session

use scanwatch::backends::MockScanApi;
use scanwatch::core::{ResultsBody, ScanCreated, StatusBody};
use scanwatch::prelude::*;

use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Scanwatch Basic Session Example ===\n");

    // Script a backend: the scan runs through two phases, then
    // completes with two findings.
    let api = Arc::new(MockScanApi::new());
    api.push_start(Ok(ScanCreated::new("scan-demo", "Initializing scan...")));
    api.push_running(35, "Analyzing dependencies...");
    api.push_running(70, "Scanning source code...");
    api.push_status(Ok(StatusBody::completed()));
    api.push_results(Ok(serde_json::from_str::<ResultsBody>(
        r#"{"vulnerabilities":[
            {"id":"v1","type":"vulnerability","severity":"critical",
             "title":"SQL Injection in user authentication",
             "description":"Direct SQL query construction without parameterization",
             "file_path":"src/auth.py","line_number":45},
            {"id":"v2","type":"dependency","severity":"high",
             "title":"Vulnerable dependency: lodash@4.17.20",
             "file_path":"package.json"}
        ]}"#,
    )?));

    // Subscribe to session events
    let (sink, mut events) = ChannelSink::channel();

    // Build the controller with a fast poll interval for the demo
    let controller = SessionController::builder()
        .with_arc_api(api as ArcScanApi)
        .with_event_sink(sink)
        .with_config(SessionConfig::new().with_poll_interval(Duration::from_millis(200)))
        .build()?;

    // Start the scan
    let request = ScanRequest::full().with_repository_id("demo-repo");
    controller.start(request).await?;
    println!(
        "Scan submitted: {}",
        controller.snapshot().scan_id.unwrap_or_default()
    );

    // Render events as the session progresses
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Progress {
                progress,
                phase_label,
            } => {
                println!("  [{:3}%] {}", progress, phase_label);
            }
            SessionEvent::Completed { findings } => {
                println!("\n=== Scan Complete ===");
                println!("Found {} security issues:\n", findings.len());
                for finding in &findings {
                    println!(
                        "  [{}] {} ({})",
                        finding.severity, finding.title, finding.category
                    );
                    if !finding.file_path.is_empty() {
                        match finding.line {
                            Some(line) => println!("      {}:{}", finding.file_path, line),
                            None => println!("      {}", finding.file_path),
                        }
                    }
                }
                break;
            }
            SessionEvent::Failed { message } => {
                eprintln!("Scan failed: {}", message);
                break;
            }
        }
    }

    controller.close();
    println!("\n=== Example Complete ===");
    Ok(())
}
