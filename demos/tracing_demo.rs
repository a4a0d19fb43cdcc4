//! Demonstrates tracing integration with matched sequences and checked actions
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::io;

use slackwater::prelude::*;
use slackwater::{Checked, Failure, Fatal, MatchError, Matched};

fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    tracing::info!("Starting tracing demo");

    let headers = Values::new(vec!["id", "name", "email"]);
    let columns = Values::new(vec!["id", "name", "mail"]);
    let matched = Matched::new(&headers, &columns);

    match matched.collect_vec() {
        Ok(names) => tracing::info!("Headers match: {:?}", names),
        Err(e) => tracing::error!("Headers rejected: {}", e),
    }

    let import = Checked::new(
        |_: ()| -> Result<usize, Failure> {
            match matched.validate() {
                Ok(names) => Ok(names.len()),
                Err(MatchError::InvalidState(mismatch)) => Err(Fatal::from(mismatch).into()),
                Err(MatchError::Upstream(never)) => match never {},
            }
        },
        io::Error::other,
    );

    match import.exec(()) {
        Ok(count) => tracing::info!("Imported {} columns", count),
        Err(e) => tracing::error!("Import failed: {}", e),
    }
}
