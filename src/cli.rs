use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cinelog", version, about = "Personal movie catalog")]
pub struct Cli {
    #[arg(long, value_enum, help = "Storage backend for the catalog")]
    pub backend: Option<Backend>,
    #[arg(long, help = "Directory holding the catalog and exported artifacts")]
    pub data_dir: Option<PathBuf>,
    #[arg(long, value_enum, help = "What to do when adding a title that already exists")]
    pub on_duplicate: Option<DuplicatePolicy>,
    #[arg(long, help = "Log in as this user instead of prompting")]
    pub user: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Json,
    Sqlite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    Overwrite,
    Confirm,
}
