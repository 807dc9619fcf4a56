//! CLI definitions for SelectorLab.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SelectorLab CLI.
#[derive(Parser)]
#[command(name = "selectorlab")]
#[command(about = "Derive and verify extraction locators for web pages")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "SELECTORLAB_CONFIG",
        default_value = "config/selectorlab.toml",
        global = true
    )]
    pub config: PathBuf,

    /// Assistant endpoint base address (overrides config and environment)
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Mock mode: true, false or auto (overrides config and environment)
    #[arg(long, global = true)]
    pub mock_mode: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch a page rewritten for embedding
    Fetch {
        /// Target URL
        url: String,

        /// Write the markup to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Test a locator expression against a live page
    Verify {
        /// Target URL
        url: String,

        /// CSS selector, optionally suffixed with ::text, ::html or ::attr(NAME)
        expression: String,

        /// Extraction mode when the expression has no suffix (text, html, attr:NAME)
        #[arg(short, long, default_value = "text")]
        mode: String,

        /// Field name echoed back in the response
        #[arg(long)]
        field: Option<String>,
    },

    /// Verify every locator of a saved transfer payload
    VerifySet {
        /// Transfer payload file (as written by `generate --save`)
        payload: PathBuf,

        /// Verify against this URL instead of the payload's target URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Synthesize a CSS path for the first element matching EXPRESSION
    Synthesize {
        /// Target URL
        url: String,

        /// Selector picking the element to treat as clicked
        expression: String,
    },

    /// Ask the assistant for a locator set
    Generate {
        /// Target URL
        url: String,

        /// What to extract, in plain language
        intent: String,

        /// Save the locator set as a transfer payload
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Ask the assistant to improve one locator
    Refine {
        /// Target URL
        url: String,

        /// Field name
        field: String,

        /// Current expression
        expression: String,
    },

    /// Check assistant endpoint reachability
    Probe {
        /// Try the well-known local addresses as well
        #[arg(long)]
        discover: bool,
    },
}
