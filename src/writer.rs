use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvWriterConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            line_ending: LineEnding::default(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl From<LineEnding> for csv::Terminator {
    fn from(source: LineEnding) -> Self {
        match source {
            LineEnding::Lf => Self::Any(b'\n'),
            LineEnding::Crlf => Self::CRLF,
        }
    }
}

impl CsvWriterConfig {
    /// The delimiter must be a single ASCII byte that can't be confused with
    /// quoting or record boundaries.
    pub fn validate(&self) -> Result<()> {
        match u8::try_from(self.delimiter) {
            Ok(b) if b.is_ascii() && !matches!(b, b'"' | b'\n' | b'\r') => Ok(()),
            _ => Err(anyhow!("Invalid csv delimiter {:?}", self.delimiter)),
        }
    }

    fn builder(&self) -> Result<csv::WriterBuilder> {
        self.validate()?;
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.delimiter as u8)
            .terminator(self.line_ending.into())
            .quote_style(csv::QuoteStyle::Always)
            .has_headers(false);
        Ok(builder)
    }
}

/// Writes one quoted field per row, truncating any previous content of `path`.
///
/// Returns the number of rows written.
pub fn write_links<P, S>(path: P, links: &[S], conf: &CsvWriterConfig) -> Result<usize>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let mut wtr = conf
        .builder()?
        .from_path(path)
        .with_context(|| format!("Couldn't create {}", path.display()))?;

    for link in links {
        let link = link.as_ref();
        log::debug!("Writing URL {link}");
        wtr.write_record([link])?;
    }
    wtr.flush()
        .with_context(|| format!("Couldn't flush {}", path.display()))?;

    Ok(links.len())
}
