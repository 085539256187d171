//! # CLI Module
//!
//! This module provides the command-line interface layer for Sporldata. It
//! implements the user-facing commands and coordinates between the catalog
//! client, the collection pipeline and the user's terminal.
//!
//! ## Command Categories
//!
//! ### Collection
//!
//! - [`collect`] - Runs the full artist → album → track collection and writes the dataset
//!
//! ### Inspection
//!
//! - [`artists`] - Resolves the configured artist names and shows which catalog artist each one maps to
//! - [`normalize`] - Prints the normalized form of a piece of text
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Pipeline (Collection Run)
//!     ↓
//! Management Layer (Tokens, Pacing, Dataset Output)
//!     ↓
//! API Layer (Spotify Integration)
//! ```
//!
//! ## Error Handling
//!
//! - Fatal errors (missing credentials, rejected credentials, unwritable output)
//!   are printed with the red `!` marker and end the process with exit code 1
//! - Errors that only concern one artist, album or track are printed as
//!   warnings and the command carries on
//!
//! ## Progress and User Experience
//!
//! Long-running commands show a spinner whose message names the artist or
//! track being fetched. Warnings are printed above the spinner.
//!
//! ## Usage Patterns
//!
//! ```bash
//! sporldata artists                           # Check which artists will be collected
//! sporldata collect                           # Collect the configured artists into Dataset.csv
//! sporldata collect --artist Metallica --output metallica.csv --pace-ms 250
//! sporldata normalize "Café del Mar – 1999"   # Preview the text normalization
//! ```

mod artists;
mod collect;
mod normalize;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use artists::artists;
pub use collect::collect;
pub use normalize::normalize;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
