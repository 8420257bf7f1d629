use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDateTime, Offset, SecondsFormat, TimeZone as _, Utc};
use chrono_tz::Tz;

use super::common::{cell_text, require_columns, rewrite_column, ColumnMatch, StageOutput};
use super::schema::TIMESTAMP;
use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::model::{Cell, Table};
use crate::pipeline::Stage;

/// `M/D/YY h:mm:ss AM|PM`
const INPUT_FORMAT: &str = "%m/%d/%y %I:%M:%S %p";

/// Reinterprets `Timestamp` wall-clock values from the source zone as RFC3339 in the target zone.
#[derive(Debug, Clone, Copy)]
pub struct TimestampStage {
    source: Tz,
    target: Tz,
}

impl TimestampStage {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            source: config.source_tz,
            target: config.target_tz,
        }
    }

    pub fn convert(&self, value: &str) -> std::result::Result<String, String> {
        let naive = NaiveDateTime::parse_from_str(value, INPUT_FORMAT)
            .map_err(|err| format!("could not parse timestamp: {err}"))?;
        let utc = localize(self.source, naive)
            .ok_or_else(|| format!("{naive} cannot be placed in {}", self.source))?;
        Ok(utc
            .with_timezone(&self.target)
            .to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl Default for TimestampStage {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl Stage for TimestampStage {
    fn name(&self) -> &'static str {
        "Timestamp"
    }

    fn apply(&self, table: &Table) -> Result<StageOutput> {
        let Some(header) = table.header() else {
            return Ok(StageOutput::unchanged(table));
        };
        let [column] = require_columns(self.name(), header, [TIMESTAMP], ColumnMatch::Exact)?;

        Ok(rewrite_column(self.name(), table, column, |cell| {
            let text = match cell_text(cell) {
                Ok(text) => text,
                Err(outcome) => return outcome,
            };
            self.convert(text).map(Cell::from).into()
        }))
    }
}

/// Places a wall-clock time in `tz`.
///
/// Overlapping times take the earlier instant. Times inside a spring-forward gap use the
/// offset in effect after the gap, so 2:30 AM on a spring-forward day reads as 1:30 AM standard.
fn localize(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(a, b) => Some(a.min(b).with_timezone(&Utc)),
        LocalResult::None => {
            let after = naive.checked_add_signed(Duration::hours(24))?;
            let offset = tz.from_local_datetime(&after).earliest()?.offset().fix();
            let shift = Duration::seconds(i64::from(offset.local_minus_utc()));
            let utc = naive.checked_sub_signed(shift)?;
            Some(utc.and_utc())
        }
    }
}
