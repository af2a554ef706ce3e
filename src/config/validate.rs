// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{GanttError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = GanttError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.simulation, raw.analysis))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_simulation(cfg)?;
    Ok(())
}

fn validate_simulation(cfg: &RawConfigFile) -> Result<()> {
    // `sort` is strongly typed and checked during deserialization.

    if cfg.simulation.max_ticks == 0 {
        return Err(GanttError::ConfigError(
            "[simulation].max_ticks must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
