//! CSV close-price replay for standalone strategy runs.
//!
//! The file needs a header row with `date` and `close` columns; other columns
//! are ignored. An empty `close` cell is a bar with no price.

use crate::domain::error::ShellError;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::config::DATE_FORMAT;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

pub struct CsvPriceReplay {
    path: PathBuf,
}

impl CsvPriceReplay {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn column(headers: &csv::StringRecord, name: &str) -> Result<usize, ShellError> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| ShellError::PriceFeed {
                reason: format!("missing {} column", name),
            })
    }

    /// Bars between `start_date` and `end_date` inclusive, oldest first.
    pub fn bars(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Vec<PriceBar>, ShellError> {
        let content = fs::read_to_string(&self.path).map_err(|e| ShellError::PriceFeed {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| ShellError::PriceFeed {
            reason: format!("CSV parse error: {}", e),
        })?;
        let date_idx = Self::column(headers, "date")?;
        let close_idx = Self::column(headers, "close")?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| ShellError::PriceFeed {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_idx).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|e| {
                ShellError::PriceFeed {
                    reason: format!("invalid date {:?}: {}", date_str, e),
                }
            })?;
            if date < start_date || date > end_date {
                continue;
            }

            let close = match record.get(close_idx).map(str::trim) {
                None | Some("") => None,
                Some(raw) => Some(raw.parse::<f64>().map_err(|e| ShellError::PriceFeed {
                    reason: format!("invalid close value on {}: {}", date, e),
                })?),
            };

            bars.push(PriceBar { date, close });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}
