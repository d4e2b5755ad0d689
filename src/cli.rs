// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands share the same crawl options:
// - generate: crawl a site and write sitemap.xml
// - list:     crawl a site and print the pages found (table or JSON)
//
// Crawl options can also come from SITEMAP_GEN_* environment variables
// (clap's "env" feature); an explicit flag always wins.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{default_user_agent, CrawlConfig, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-gen",
    version,
    about = "Crawl a website and generate a sitemap.xml",
    long_about = "sitemap-gen starts from a URL, follows every link that stays on the same host, \
                  and writes the pages it finds as a standard sitemap.xml. \
                  Press Ctrl-C to stop a crawl early."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and write a sitemap
    ///
    /// Example: sitemap-gen generate https://example.com -o sitemap.xml
    Generate {
        #[command(flatten)]
        crawl: CrawlArgs,

        /// Where to write the sitemap
        #[arg(short, long, default_value = "sitemap.xml")]
        output: PathBuf,

        /// Write whatever was collected even if the crawl is cancelled with Ctrl-C
        #[arg(long)]
        keep_partial: bool,
    },

    /// Crawl a website and print the pages that would go into the sitemap
    ///
    /// Example: sitemap-gen list https://example.com --json
    List {
        #[command(flatten)]
        crawl: CrawlArgs,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by every subcommand that crawls
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Website URL to start from (e.g., https://example.com)
    pub url: String,

    /// Maximum number of pages in the sitemap
    #[arg(long, env = "SITEMAP_GEN_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "SITEMAP_GEN_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "SITEMAP_GEN_USER_AGENT", default_value_t = default_user_agent())]
    pub user_agent: String,

    /// Also record <img> URLs found on each page (image sitemap entries)
    #[arg(long)]
    pub images: bool,

    /// Stop the crawl after this many seconds; the pages found so far are still used
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<u64>,
}

impl CrawlArgs {
    /// Turns the parsed flags into a crawl configuration (not yet validated)
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_pages: self.max_pages,
            fetch_timeout: Duration::from_secs(self.timeout),
            user_agent: self.user_agent.clone(),
            collect_images: self.images,
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit.map(Duration::from_secs)
    }
}
