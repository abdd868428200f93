use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::library::MAX_EPISODE_NUMBER;

/// Library root used when neither `--library-path` nor the environment sets one
pub const DEFAULT_LIBRARY_PATH: &str = "Z:/";

#[derive(Parser, Debug)]
#[command(name = "episodify")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename TV show episode files to SxEy form")]
pub struct Args {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process every new show folder under "<library>/TV Shows"
    Scan(ScanArgs),

    /// Rename the episode files of a single show folder
    Rename(RenameArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ScanArgs {
    /// Media library root
    #[arg(
        short,
        long,
        env = "EPISODIFY_LIBRARY_PATH",
        default_value = DEFAULT_LIBRARY_PATH,
        value_name = "PATH"
    )]
    pub library_path: PathBuf,

    /// Rename without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Use season 1, episode 1 for every folder instead of prompting
    #[arg(long)]
    pub default_numbering: bool,
}

#[derive(ClapArgs, Debug)]
pub struct RenameArgs {
    /// Show folder containing the episode files
    pub path: PathBuf,

    /// Season number (0-9999)
    #[arg(
        short,
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(0..=MAX_EPISODE_NUMBER as i64)
    )]
    pub season: u32,

    /// Episode number of the first file (0-9999)
    #[arg(
        short = 'e',
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(0..=MAX_EPISODE_NUMBER as i64)
    )]
    pub start_episode: u32,

    /// Rename without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}
