use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::categories::{CategoryTable, ITUNES_BASE_URL};
use crate::writer::CsvWriterConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per request timeout, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: f32,

    #[serde(default = "default_connect_retries")]
    pub connect_retries: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_on_fetch_error")]
    pub on_fetch_error: OnError,

    #[serde(default)]
    pub csv: CsvWriterConfig,

    #[serde(default)]
    pub categories: CategoryTable,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            connect_retries: default_connect_retries(),
            user_agent: default_user_agent(),
            on_fetch_error: default_on_fetch_error(),
            csv: CsvWriterConfig::default(),
            categories: CategoryTable::default(),
        }
    }
}

impl CollectorConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Couldn't open {}", path.display()))?;
        let conf = serde_yaml::from_reader(file)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<()> {
        let timeout = Duration::try_from_secs_f32(self.timeout)
            .with_context(|| format!("Invalid timeout {}", self.timeout))?;
        if timeout.is_zero() {
            return Err(anyhow!("Timeout must be a positive number of seconds"));
        }
        self.csv.validate()?;
        self.categories.validate()?;
        Ok(())
    }
}

fn default_base_url() -> String {
    String::from(ITUNES_BASE_URL)
}

fn default_timeout() -> f32 {
    5.0
}

fn default_connect_retries() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("podscraper/{}", env!("CARGO_PKG_VERSION"))
}

fn default_on_fetch_error() -> OnError {
    OnError::Abort
}

/// What to do with the remaining categories once a page couldn't be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnError {
    Abort,
    SkipAndLog,
}

impl FromStr for OnError {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "abort" => Ok(Self::Abort),
            "skip-and-log" => Ok(Self::SkipAndLog),
            _ => Err(anyhow!("Unknown error strategy: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::writer::LineEnding;

    #[test]
    fn defaults() {
        let conf = CollectorConfig::default();
        assert_eq!("https://itunes.apple.com/us/genre/", conf.base_url);
        assert_eq!(5.0, conf.timeout);
        assert_eq!(10, conf.connect_retries);
        assert_eq!(OnError::Abort, conf.on_fetch_error);
        assert_eq!(CategoryTable::itunes(), conf.categories);
        assert_eq!(',', conf.csv.delimiter);
        assert!(conf.validate().is_ok());
    }

    #[test]
    fn yaml_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
baseUrl: "http://localhost:8080/genre/"
timeout: 0.5
onFetchError: SkipAndLog
csv:
  lineEnding: crlf
categories:
  - name: arts
    slug: podcasts-arts/id1301
  - name: true_crime
    slug: podcasts-true-crime/id1488
"#
        )
        .unwrap();

        let conf = CollectorConfig::from_yaml_file(file.path()).unwrap();

        assert_eq!("http://localhost:8080/genre/", conf.base_url);
        assert_eq!(0.5, conf.timeout);
        assert_eq!(10, conf.connect_retries);
        assert_eq!(OnError::SkipAndLog, conf.on_fetch_error);
        assert_eq!(LineEnding::Crlf, conf.csv.line_ending);
        assert_eq!(',', conf.csv.delimiter);
        assert_eq!(2, conf.categories.len());
        assert_eq!("true_crime", conf.categories[1].name);
    }

    #[test]
    fn invalid_timeout() {
        for timeout in [0., -1., f32::NAN, f32::INFINITY, 1e20] {
            let conf = CollectorConfig {
                timeout,
                ..Default::default()
            };
            assert!(conf.validate().is_err());
        }
    }

    #[test]
    fn invalid_csv_delimiter() {
        let conf = CollectorConfig {
            csv: CsvWriterConfig {
                delimiter: '→',
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(conf.validate().is_err());
    }

    #[test]
    fn invalid_table() {
        let conf = CollectorConfig {
            categories: CategoryTable::from(vec![("news", "a"), ("news", "b")]),
            ..Default::default()
        };
        assert!(conf.validate().is_err());
    }

    #[test]
    fn on_error_from_str() {
        assert_eq!(OnError::Abort, "abort".parse::<OnError>().unwrap());
        assert_eq!(OnError::SkipAndLog, "skip-and-log".parse::<OnError>().unwrap());
        assert!("retry".parse::<OnError>().is_err());
    }
}
