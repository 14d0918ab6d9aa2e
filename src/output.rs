use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;
use tracing::info;

use crate::app::{Lookup, ProgressEvent, ProgressSink, RunReport};
use crate::domain::ScrapeStatus;
use crate::record::PatentRecord;

#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    pub report: &'a RunReport,
    pub statuses: &'a BTreeMap<String, ScrapeStatus>,
    pub records: &'a BTreeMap<String, PatentRecord>,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_run(output: &RunOutput<'_>) -> io::Result<()> {
        Self::print_json(output)
    }

    pub fn print_lookup(lookup: &Lookup) -> io::Result<()> {
        Self::print_json(lookup)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub struct LogSink;

impl ProgressSink for LogSink {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => info!(
                latency_ms = elapsed.as_millis() as u64,
                "{}", event.message
            ),
            None => info!("{}", event.message),
        }
    }
}
