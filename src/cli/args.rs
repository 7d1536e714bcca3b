//! CLI argument structures

use crate::api::Role;
use crate::ranking::Strategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rank active workers or workplaces by completed shifts
#[derive(Parser, Debug)]
#[command(name = "shiftrank")]
#[command(about = "shiftrank - Rank the top workers and workplaces by completed shifts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the shifts API (default: http://localhost:3000)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Number of entities to keep (default: 3)
    #[arg(short = 'n', long, global = true)]
    pub top: Option<usize>,

    /// How workplace counts are gathered
    #[arg(long, global = true, value_enum)]
    pub strategy: Option<Strategy>,

    /// Keep the leading record of every workplace shift page
    #[arg(long, global = true)]
    pub no_skip_leading_shift: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Top active workers by completed shifts (default command)
    Workers,
    /// Top active workplaces by completed shifts
    Workplaces,
}

impl Commands {
    pub fn role(&self) -> Role {
        match self {
            Commands::Workers => Role::Worker,
            Commands::Workplaces => Role::Workplace,
        }
    }
}
