use std::path::{Path, PathBuf};

use crate::session::FetchError;

/// How a single category went.
#[derive(Debug)]
pub enum CategoryOutcome {
    Written { path: PathBuf, links: usize },
    /// The listing matched nothing, an empty file was still written
    Empty { path: PathBuf },
    FetchFailed(FetchError),
}

impl CategoryOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Written { path, .. } | Self::Empty { path } => Some(path.as_path()),
            Self::FetchFailed(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FetchFailed(_))
    }
}

#[derive(Debug, Default)]
pub struct ScrapeReport {
    /// Attempted categories, in run order
    pub outcomes: Vec<(String, CategoryOutcome)>,
    /// The category whose failure stopped the run
    pub aborted_at: Option<String>,
    /// Categories never attempted because the run was aborted
    pub pending: Vec<String>,
}

impl ScrapeReport {
    pub fn is_complete(&self) -> bool {
        self.aborted_at.is_none() && !self.outcomes.iter().any(|(_, o)| o.is_failure())
    }

    pub fn outcome(&self, category: &str) -> Option<&CategoryOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, o)| o)
    }

    pub fn written_files(&self) -> Vec<&Path> {
        self.outcomes.iter().filter_map(|(_, o)| o.path()).collect()
    }

    pub fn failures(&self) -> Vec<(&str, &FetchError)> {
        self.outcomes
            .iter()
            .filter_map(|(name, o)| match o {
                CategoryOutcome::FetchFailed(e) => Some((name.as_str(), e)),
                _ => None,
            })
            .collect()
    }
}
