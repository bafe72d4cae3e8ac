use crate::commands::{CmdMessage, CmdResult, StorefrontPaths};
use crate::config::StorefrontConfig;
use crate::error::Result;
use std::fs;

pub fn run(paths: &StorefrontPaths) -> Result<CmdResult> {
    fs::create_dir_all(&paths.data_dir)?;
    let config = StorefrontConfig::load(paths.config_dir())?;
    config.save(paths.config_dir())?;

    let mut result = CmdResult::default().with_config(config);
    result.add_message(CmdMessage::success(format!(
        "Initialized storefront data at {}",
        paths.data_dir.display()
    )));
    Ok(result)
}
