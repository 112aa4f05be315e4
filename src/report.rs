//! Writes each step's result to an output stream.
//!
//! Records are rendered as pretty JSON; raw store documents go through relaxed
//! Extended JSON so ObjectIds and numbers stay readable.

use mongodb::bson::{Bson, Document};
use serde::Serialize;
use std::io::Write;

use crate::errors::QueryResult;

pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Starts a new block of output, separated from the previous one by a blank line.
    pub fn heading(&mut self, heading: &str) -> QueryResult<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", heading)?;
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> QueryResult<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn records<T: Serialize>(&mut self, heading: &str, records: &[T]) -> QueryResult<()> {
        self.heading(heading)?;
        writeln!(self.out, "{}", serde_json::to_string_pretty(records)?)?;
        Ok(())
    }

    /// `label` followed by the compact JSON form of `value`, on one line.
    pub fn value<T: Serialize + ?Sized>(&mut self, label: &str, value: &T) -> QueryResult<()> {
        writeln!(self.out, "{} {}", label, serde_json::to_string(value)?)?;
        Ok(())
    }

    pub fn document(&mut self, document: &Document) -> QueryResult<()> {
        let json = Bson::Document(document.clone()).into_relaxed_extjson();
        writeln!(self.out, "{}", serde_json::to_string_pretty(&json)?)?;
        Ok(())
    }

    pub fn flush(&mut self) -> QueryResult<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
