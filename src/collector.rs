use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::categories::Category;
use crate::config::{CollectorConfig, OnError};
use crate::extract::extract_links;
use crate::report::{CategoryOutcome, ScrapeReport};
use crate::session::HttpSession;
use crate::writer::write_links;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Abort,
}

/// Decides whether the run goes on after `outcome`.
pub fn next_step(outcome: &CategoryOutcome, on_error: OnError) -> Flow {
    match (outcome, on_error) {
        (CategoryOutcome::FetchFailed(_), OnError::Abort) => Flow::Abort,
        _ => Flow::Continue,
    }
}

/// Scrapes every category listing page into `<base>/categories/<name>.csv`.
#[derive(Debug)]
pub struct CategoryCollector {
    output_dir: PathBuf,
    config: CollectorConfig,
}

impl CategoryCollector {
    pub fn new<P: AsRef<Path>>(base_path: P, config: CollectorConfig) -> Self {
        Self {
            output_dir: base_path.as_ref().join("categories"),
            config,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Fetches categories in table order.
    ///
    /// Fetch failures end up in the report and, depending on
    /// `on_fetch_error`, stop the run. Filesystem failures are returned as
    /// errors.
    pub async fn scrape(&self) -> Result<ScrapeReport> {
        self.config.validate()?;

        let session = HttpSession::new(&self.config)?;
        let mut report = ScrapeReport::default();
        let mut dir_ready = false;

        let mut categories = self.config.categories.iter();
        while let Some(category) = categories.next() {
            let outcome = self
                .scrape_category(&session, category, &mut dir_ready)
                .await?;
            let flow = next_step(&outcome, self.config.on_fetch_error);
            report.outcomes.push((category.name.clone(), outcome));

            if flow == Flow::Abort {
                report.aborted_at = Some(category.name.clone());
                report.pending = categories.by_ref().map(|c| c.name.clone()).collect();
                log::warn!(
                    "Aborted at {}, {} categories not scraped",
                    category.name,
                    report.pending.len()
                );
                break;
            }
        }

        Ok(report)
    }

    async fn scrape_category(
        &self,
        session: &HttpSession,
        category: &Category,
        dir_ready: &mut bool,
    ) -> Result<CategoryOutcome> {
        let url = category.url(&self.config.base_url);
        log::info!("Scraping Category: {}", category.slug);

        let page = match session.get(&url).await {
            Ok(page) => page,
            Err(e) => {
                log::error!("{e}");
                return Ok(CategoryOutcome::FetchFailed(e));
            }
        };

        let links = extract_links(&page);

        if !*dir_ready {
            fs::create_dir_all(&self.output_dir).with_context(|| {
                format!("Couldn't create directory {}", self.output_dir.display())
            })?;
            *dir_ready = true;
        }

        let path = self.output_dir.join(category.file_name());
        let written = write_links(&path, &links, &self.config.csv)?;

        if written == 0 {
            log::info!("No links found for {}, wrote empty {}", category.name, path.display());
            Ok(CategoryOutcome::Empty { path })
        } else {
            Ok(CategoryOutcome::Written {
                path,
                links: written,
            })
        }
    }
}
