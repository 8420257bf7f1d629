use tracing::info;

use crate::config::PipelineConfig;
use crate::errors::{CellWarning, Result};
use crate::model::Table;
use crate::stages::{
    AddressStage, DurationsStage, FirstNameStage, NotesStage, StageOutput, TimestampStage,
    TotalDurationStage, ZipStage,
};

pub trait Stage {
    fn name(&self) -> &'static str;
    fn apply(&self, table: &Table) -> Result<StageOutput>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub table: Table,
    pub warnings: Vec<CellWarning>,
}

/// The fixed seven-stage normalization run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, table: &Table) -> Result<PipelineReport> {
        let timestamp = TimestampStage::new(&self.config);
        // TotalDuration reads the seconds written by Durations, so that pair must stay ordered.
        let stages: [&dyn Stage; 7] = [
            &timestamp,
            &ZipStage,
            &FirstNameStage,
            &AddressStage,
            &DurationsStage,
            &TotalDurationStage,
            &NotesStage,
        ];
        run_stages(table, &stages)
    }
}

/// Threads `table` through `stages` in order, stopping at the first fatal error.
pub fn run_stages(table: &Table, stages: &[&dyn Stage]) -> Result<PipelineReport> {
    let mut current = table.clone();
    let mut warnings = Vec::new();

    for stage in stages {
        let output = stage.apply(&current)?;
        warnings.extend(output.warnings);
        current = output.table;
    }

    info!(
        rows = current.data_rows().len(),
        warnings = warnings.len(),
        "pipeline finished"
    );

    Ok(PipelineReport {
        table: current,
        warnings,
    })
}
