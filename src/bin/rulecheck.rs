//! CLI tool for checking redirect rule documents.
//!
//! Loads a rule document the same way the server does and reports on it,
//! without starting the server.
//!
//! # Usage
//!
//! ```bash
//! # Validate a rule file and list its rules
//! cargo run --bin rulecheck -- validate data/redirects.json
//!
//! # Validate a remote rule document
//! cargo run --bin rulecheck -- validate https://config.example.com/redirects.json
//!
//! # Show where paths would be redirected
//! cargo run --bin rulecheck -- match data/redirects.json /old/page /About-Us
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Document loaded (warnings about unusable rules do not fail)
//! - `1` - Document could not be fetched or parsed

use path_redirector::domain::entities::{RedirectRule, RuleTable};
use path_redirector::domain::matcher::find_redirect;
use path_redirector::domain::repositories::RuleSource;
use path_redirector::infrastructure::sources::{FileRuleSource, HttpRuleSource};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::time::Duration;
use url::Url;

/// CLI tool for checking redirect rules.
#[derive(Parser)]
#[command(name = "rulecheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Timeout in seconds when fetching a remote document
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Parse a rule document and list its rules
    Validate {
        /// Rule file path or http(s) URL
        source: String,
    },

    /// Show the redirect decision for one or more paths
    Match {
        /// Rule file path or http(s) URL
        source: String,

        /// Request paths to evaluate
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout);

    match cli.command {
        Commands::Validate { source } => validate(&source, timeout).await?,
        Commands::Match { source, paths } => match_paths(&source, &paths, timeout).await?,
    }

    Ok(())
}

/// Builds the source for a file path or URL argument.
fn open_source(location: &str, timeout: Duration) -> Result<Box<dyn RuleSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let url = Url::parse(location).context("Invalid rule URL")?;
        Ok(Box::new(HttpRuleSource::new(url, timeout, 0)?))
    } else {
        Ok(Box::new(FileRuleSource::new(location)))
    }
}

async fn load(location: &str, timeout: Duration) -> Result<RuleTable> {
    let source = open_source(location, timeout)?;
    source
        .fetch_rules()
        .await
        .with_context(|| format!("Failed to load rules from {}", source.describe()))
}

/// Lists every rule and flags the ones that can never redirect.
///
/// # Output Format
///
/// ```text
/// 📋 Redirect Rules (data/redirects.json)
///
///   #   Mode      Status  Match                          Target
///   ─────────────────────────────────────────────────────────────────────────
///   0   prefix    301     /old                           /new
///   1   exact     302     /about-us                      /about
///   2   exact     302     (empty)                        /nowhere   ⚠ never matches
/// ```
async fn validate(location: &str, timeout: Duration) -> Result<()> {
    let table = load(location, timeout).await?;

    println!(
        "{} {}",
        "📋 Redirect Rules".bright_blue().bold(),
        format!("({})", location).bright_black()
    );
    println!();

    if table.is_empty() {
        println!("{}", "  Document contains no rules".yellow());
        return Ok(());
    }

    println!(
        "  {:<3} {:<9} {:<7} {:<30} {}",
        "#".bright_white().bold(),
        "Mode".bright_white().bold(),
        "Status".bright_white().bold(),
        "Match".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    let mut warnings = 0;
    for (index, rule) in table.iter().enumerate() {
        let problem = rule_problem(rule);
        if problem.is_some() {
            warnings += 1;
        }

        println!(
            "  {:<3} {:<9} {:<7} {:<30} {} {}",
            index.to_string().bright_black(),
            if rule.use_relative { "prefix" } else { "exact" },
            rule.kind.status_code(),
            display_or_empty(&rule.match_path).cyan(),
            display_or_empty(&rule.target_path),
            problem
                .map(|p| format!("⚠ {}", p).yellow().to_string())
                .unwrap_or_default()
        );
    }

    println!();
    println!(
        "  Total: {}  Warnings: {}",
        table.len().to_string().bright_white().bold(),
        if warnings > 0 {
            warnings.to_string().yellow().bold()
        } else {
            warnings.to_string().green().bold()
        }
    );
    println!();

    Ok(())
}

/// Runs the matcher for each path against the loaded document.
async fn match_paths(location: &str, paths: &[String], timeout: Duration) -> Result<()> {
    let table = load(location, timeout).await?;

    for path in paths {
        match find_redirect(path, &table) {
            Some(decision) => println!(
                "  {} {} {} {} {}",
                decision.status_code().to_string().green().bold(),
                path.cyan(),
                "→".bright_black(),
                decision.target_url.bright_white(),
                format!("(rule #{})", decision.rule_index).bright_black()
            ),
            None => println!(
                "  {} {} {}",
                "---".bright_black(),
                path.cyan(),
                "no redirect".bright_black()
            ),
        }
    }

    Ok(())
}

/// Explains why a rule can never produce a redirect, if it can't.
fn rule_problem(rule: &RedirectRule) -> Option<&'static str> {
    if !rule.is_eligible() {
        Some("never matches")
    } else if rule.target_path.is_empty() && !rule.use_relative {
        Some("empty target")
    } else {
        None
    }
}

fn display_or_empty(value: &str) -> &str {
    if value.is_empty() { "(empty)" } else { value }
}
