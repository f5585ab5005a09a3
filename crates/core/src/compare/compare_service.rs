use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};

use super::comparator::compare_portfolios;
use super::compare_model::{ComparisonOutcome, ComparisonResult};
use super::compare_traits::ComparisonServiceTrait;
use crate::errors::{Error, Result};
use crate::holdings::Portfolio;
use crate::parser::{ParserConfig, PortfolioParser};
use crate::report::ReportWriter;
use crate::spreadsheet::RowSource;

/// Runs quarter comparisons, one at a time.
///
/// A call made while another is in progress fails with
/// [`Error::AlreadyRunning`] instead of waiting.
pub struct ComparisonService {
    config: ParserConfig,
    report_writer: Arc<dyn ReportWriter>,
    running: AtomicBool,
}

impl ComparisonService {
    pub fn new(config: ParserConfig, report_writer: Arc<dyn ReportWriter>) -> Self {
        ComparisonService {
            config,
            report_writer,
            running: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Diffs two in-memory sheets with the service's configuration.
    pub fn compare_sources<S: RowSource>(
        &self,
        previous: S,
        current: S,
    ) -> Result<ComparisonResult> {
        let _guard = self.begin()?;
        let previous = PortfolioParser::from_source(previous, &self.config)?.into_portfolio()?;
        let current = PortfolioParser::from_source(current, &self.config)?.into_portfolio()?;
        compare_portfolios(&previous, &current)
    }

    pub(crate) fn begin(&self) -> Result<RunningGuard<'_>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Rejected comparison request: another comparison is running");
            return Err(Error::AlreadyRunning);
        }
        Ok(RunningGuard {
            running: &self.running,
        })
    }

    fn load_portfolio(&self, path: &Path) -> Result<Portfolio> {
        let portfolio = PortfolioParser::open(path, &self.config)?.into_portfolio()?;
        info!("Parsed {} holdings from {}", portfolio.len(), path.display());
        Ok(portfolio)
    }

    fn run(&self, previous_path: &Path, current_path: &Path) -> Result<ComparisonResult> {
        let previous = self.load_portfolio(previous_path)?;
        let current = self.load_portfolio(current_path)?;
        compare_portfolios(&previous, &current)
    }
}

impl ComparisonServiceTrait for ComparisonService {
    fn compare(&self, previous_path: &Path, current_path: &Path) -> Result<ComparisonResult> {
        let _guard = self.begin()?;
        self.run(previous_path, current_path)
    }

    fn compare_and_write(
        &self,
        previous_path: &Path,
        current_path: &Path,
        output_path: &Path,
    ) -> Result<ComparisonOutcome> {
        let _guard = self.begin()?;
        let result = self.run(previous_path, current_path)?;
        let output_path = self.report_writer.write_report(output_path, &result)?;
        info!("Report written to {}", output_path.display());

        Ok(ComparisonOutcome {
            result,
            output_path,
        })
    }
}

/// Clears the running flag when a comparison ends, however it ends.
pub(crate) struct RunningGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
