pub mod add;
pub mod backup;
pub mod clear;
pub mod config;
pub mod del;
pub mod dups;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod roster;
pub mod show;
pub mod stats;

use crate::config::Config;
use crate::errors::AppResult;
use crate::remote::CsvSheet;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// The offline sheet mirror, when `mirror_dir` is configured.
pub(crate) fn open_mirror(cfg: &Config) -> AppResult<Option<CsvSheet>> {
    cfg.mirror_dir
        .as_deref()
        .map(|dir| CsvSheet::open(expand_tilde(dir)))
        .transpose()
}
