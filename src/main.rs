// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate the seed URL and crawl settings
// 3. Run the crawl on its own tokio task, printing progress as it arrives
//    and turning Ctrl-C into a cancel request
// 4. Write the sitemap (generate) or print the pages (list)
// 5. Exit with proper code (0 = success, 1 = cancelled with Ctrl-C, 2 = error)
//
// Status messages and progress lines go to stderr; stdout only carries the
// actual result of `list`, so `sitemap-gen list URL --json > pages.json`
// produces clean JSON.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod record;
mod sitemap;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use url::Url;

use cli::{Cli, Commands, CrawlArgs};
use crawl::{CancelReason, CancelSignal, CrawlResult, Crawler, ProgressEvent, ProgressSink};
use record::PageRecord;

#[tokio::main]
async fn main() {
    init_logger();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics are quiet by default; RUST_LOG=info or RUST_LOG=debug shows
// what the crawler is doing
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

// Returns:
//   Ok(0) = finished normally (including stopping at --time-limit)
//   Ok(1) = crawl was cancelled with Ctrl-C
//   Err   = invalid input, or the sitemap could not be written
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            crawl,
            output,
            keep_partial,
        } => {
            let outcome = run_crawl(&crawl).await?;
            finish_generate(&outcome, &output, keep_partial)
        }
        Commands::List { crawl, json } => {
            let outcome = run_crawl(&crawl).await?;
            print_results(&outcome.result.records, json)?;
            Ok(outcome.exit_code())
        }
    }
}

/// A finished crawl plus what, if anything, stopped it early
struct CrawlOutcome {
    result: CrawlResult,
    stopped_by: Option<CancelReason>,
}

impl CrawlOutcome {
    // Only a user cancel is reported as a non-zero exit; hitting the time
    // limit is the normal end of a time-boxed run
    fn exit_code(&self) -> i32 {
        match self.stopped_by {
            Some(CancelReason::Requested) => 1,
            _ => 0,
        }
    }
}

// Writes the sitemap for the 'generate' subcommand
//
// - finished normally:   write the sitemap
// - time limit reached:  write what was collected, say so
// - cancelled by user:   write nothing, unless --keep-partial was given
fn finish_generate(outcome: &CrawlOutcome, output: &Path, keep_partial: bool) -> Result<i32> {
    match outcome.stopped_by {
        Some(CancelReason::Requested) if !keep_partial => {
            eprintln!("Process cancelled by user.");
            return Ok(1);
        }
        Some(CancelReason::TimeLimit) => {
            eprintln!(
                "⏱  Time limit reached, saving the {} page(s) collected so far",
                outcome.result.len()
            );
        }
        _ => {}
    }

    sitemap::emit(&outcome.result.records, output).context("Error saving sitemap")?;
    eprintln!("✅ Sitemap created successfully: {}", output.display());

    Ok(outcome.exit_code())
}

// Validates input, then runs the crawl with progress printed to stderr
async fn run_crawl(args: &CrawlArgs) -> Result<CrawlOutcome> {
    let seed = config::parse_seed(&args.url)?;
    let config = args.to_config();
    config.validate()?;

    let crawler = Crawler::new(config).context("Failed to set up the crawler")?;

    eprintln!("🔍 Crawling website: {}", seed);
    eprintln!("📊 Max pages: {}", crawler.config().max_pages);

    let cancel = CancelSignal::new();
    let outcome = drive_crawl(crawler, seed, &cancel, args.time_limit(), |event| {
        eprintln!("{}", event)
    })
    .await?;

    if outcome.result.is_empty() && outcome.stopped_by.is_none() {
        log::warn!("No pages could be fetched from {}", args.url);
    }

    eprintln!("📄 Crawled {} page(s)", outcome.result.len());
    Ok(outcome)
}

// Runs the crawl on a worker task and waits for it
//
// While the worker runs, this function:
// - hands every progress event to `on_event` as soon as it arrives
// - sets the cancel signal on Ctrl-C (the worker stops before its next fetch)
// - arms the optional time limit on the same signal
//
// The loop ends when the worker finishes and drops its end of the channel.
async fn drive_crawl(
    crawler: Crawler,
    seed: Url,
    cancel: &CancelSignal,
    time_limit: Option<Duration>,
    mut on_event: impl FnMut(&ProgressEvent),
) -> Result<CrawlOutcome> {
    let deadline = time_limit.map(|limit| cancel.cancel_after(limit));
    let (progress, mut events) = ProgressSink::channel();

    let worker = {
        let cancel = cancel.clone();
        tokio::spawn(async move { crawler.crawl(&seed, &progress, &cancel).await })
    };

    // One listener for the whole crawl, so a Ctrl-C that arrives while an
    // event is being printed is still seen on the next pass
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut listen_for_ctrl_c = true;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => on_event(&event),
                // Worker is done
                None => break,
            },
            signal = &mut ctrl_c, if listen_for_ctrl_c && !cancel.is_cancelled() => {
                // Either way this future is finished and must not be polled again
                listen_for_ctrl_c = false;
                match signal {
                    Ok(()) => {
                        eprintln!("⏹  Cancelling... waiting for the current request to finish");
                        cancel.cancel();
                    }
                    Err(e) => log::warn!("Unable to listen for Ctrl-C: {}", e),
                }
            }
        }
    }

    let result = worker.await.context("Crawl worker stopped unexpectedly")?;

    // The timer is no longer needed once the worker has returned
    if let Some(deadline) = deadline {
        deadline.abort();
    }

    let stopped_by = if result.cancelled {
        cancel.reason()
    } else {
        None
    };

    Ok(CrawlOutcome { result, stopped_by })
}

// Prints the records either as a table or JSON
fn print_results(records: &[PageRecord], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(records)?;
        println!("{}", json_output);
    } else {
        print_table(records);
    }
    Ok(())
}

// Prints records as a human-readable table in the terminal
fn print_table(records: &[PageRecord]) {
    println!("{:<60} {:<12} {:<10} {:<10}", "URL", "LASTMOD", "PRIORITY", "CHANGEFREQ");
    println!("{}", "=".repeat(95));

    for record in records {
        // Truncate URL if too long for display
        let url_display = if record.location.chars().count() > 57 {
            let head: String = record.location.chars().take(57).collect();
            format!("{}...", head)
        } else {
            record.location.clone()
        };

        println!(
            "{:<60} {:<12} {:<10} {:<10}",
            url_display,
            record.last_modified_str(),
            record.priority.as_str(),
            record.change_frequency.as_str()
        );

        for image in &record.images {
            println!("    🖼  {}", image);
        }
    }

    println!();
    println!("📊 Total: {} page(s)", records.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlConfig;
    use std::fs;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn links_page(hrefs: &[&str]) -> String {
        hrefs
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect()
    }

    fn seed_of(server: &MockServer) -> Url {
        Url::parse(&format!("{}/", server.uri())).unwrap()
    }

    fn crawler() -> Crawler {
        Crawler::new(CrawlConfig {
            max_pages: 10,
            fetch_timeout: Duration::from_secs(5),
            ..CrawlConfig::default()
        })
        .unwrap()
    }

    fn outcome(stopped_by: Option<CancelReason>) -> CrawlOutcome {
        let record = PageRecord::new(
            "https://example.test/".to_string(),
            "https://example.test/",
            None,
            record::today(),
        );
        CrawlOutcome {
            result: CrawlResult {
                records: vec![record],
                cancelled: stopped_by.is_some(),
            },
            stopped_by,
        }
    }

    #[tokio::test]
    async fn test_drive_crawl_forwards_progress_in_order() {
        let server = MockServer::start().await;
        let base = server.uri();
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(links_page(&["/a", "/missing"])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>a</p>"))
            .mount(&server)
            .await;

        let mut lines = Vec::new();
        let outcome = drive_crawl(crawler(), seed_of(&server), &CancelSignal::new(), None, |event| {
            lines.push(event.to_string())
        })
        .await
        .unwrap();

        assert_eq!(outcome.result.len(), 2);
        assert_eq!(outcome.stopped_by, None);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(
            lines,
            vec![
                format!("link OK: {}/", base),
                format!("link OK: {}/a", base),
                format!("link ERROR: {}/missing - Status Code: 404", base),
            ]
        );
    }

    #[tokio::test]
    async fn test_time_limit_writes_partial_sitemap() {
        let server = MockServer::start().await;
        let base = server.uri();
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(links_page(&["/slow", "/later"])))
            .expect(1)
            .mount(&server)
            .await;
        // Still being served when the time limit fires
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<p>slow</p>")
                    .set_delay(Duration::from_millis(1500)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/later"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let cancel = CancelSignal::new();
        let outcome = drive_crawl(
            crawler(),
            seed_of(&server),
            &cancel,
            Some(Duration::from_millis(300)),
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(outcome.stopped_by, Some(CancelReason::TimeLimit));
        assert_eq!(outcome.result.len(), 2);

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sitemap.xml");
        let code = finish_generate(&outcome, &output, false).unwrap();

        assert_eq!(code, 0);
        let xml = fs::read_to_string(&output).unwrap();
        assert!(xml.contains(&format!("<loc>{}/slow</loc>", base)));
        assert!(!xml.contains("/later"));
    }

    #[tokio::test]
    async fn test_cancel_before_start_reports_requested() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let cancel = CancelSignal::new();
        cancel.cancel();
        let outcome = drive_crawl(crawler(), seed_of(&server), &cancel, None, |_| {})
            .await
            .unwrap();

        assert!(outcome.result.is_empty());
        assert_eq!(outcome.stopped_by, Some(CancelReason::Requested));
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn test_user_cancel_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sitemap.xml");

        let code = finish_generate(&outcome(Some(CancelReason::Requested)), &output, false).unwrap();

        assert_eq!(code, 1);
        assert!(!output.exists());
    }

    #[test]
    fn test_user_cancel_with_keep_partial_writes() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sitemap.xml");

        let code = finish_generate(&outcome(Some(CancelReason::Requested)), &output, true).unwrap();

        assert_eq!(code, 1);
        assert!(output.exists());
    }

    #[test]
    fn test_completed_crawl_writes_sitemap() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sitemap.xml");

        let code = finish_generate(&outcome(None), &output, false).unwrap();

        assert_eq!(code, 0);
        let xml = fs::read_to_string(&output).unwrap();
        assert!(xml.contains("<loc>https://example.test/</loc>"));
    }

    #[test]
    fn test_write_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("sitemap.xml");

        assert!(finish_generate(&outcome(None), &output, false).is_err());
    }
}
