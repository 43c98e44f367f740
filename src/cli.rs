use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::check::run_check;
use crate::catalog::truefalse::run_truefalse;
use crate::config::{load_rebalance_file, RebalanceSettings};
use crate::error::Result;
use crate::logging;

#[derive(Debug, Parser)]
#[command(name = "wallpaper-catalog")]
#[command(about = "Validate and rebalance wallpaper catalog JSON trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate categories.json / wallpapers.json and mirror broken folders into @@error.
    Check(CheckArgs),
    /// Reassign premium flags per category and rewrite wallpapers.json canonically.
    Truefalse(TrueFalseArgs),
}

#[derive(Debug, Clone, Parser)]
#[command(name = "check")]
#[command(about = "Validate catalog files and copy invalid folders into <root>/@@error")]
pub struct CheckArgs {
    /// Scan root; the error mirror is created at <root>/@@error.
    #[arg(short = 'r', long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "truefalse")]
#[command(about = "Rebalance premium flags in wallpapers.json files")]
pub struct TrueFalseArgs {
    /// 기준 폴더 (기본: 현재 위치)
    #[arg(short = 'r', long, default_value = ".")]
    pub root: PathBuf,
    /// premium 비율 (기본: 0.2)
    #[arg(long, allow_negative_numbers = true)]
    pub ratio: Option<f64>,
    /// 그룹당 최소 premium 개수 (기본: 1)
    #[arg(long = "min-true", allow_negative_numbers = true)]
    pub min_true: Option<i64>,
    /// 파일을 수정하지 않고 결과만 표시
    #[arg(long)]
    pub dry_run: bool,
    /// YAML file with ratio / min_true / dry_run defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl TrueFalseArgs {
    pub fn settings(&self) -> Result<RebalanceSettings> {
        let file = self
            .config
            .as_deref()
            .map(load_rebalance_file)
            .transpose()?;
        RebalanceSettings::resolve(file.as_ref(), self.ratio, self.min_true, self.dry_run)
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Command::Check(args) => handle_check(&args),
            Command::Truefalse(args) => handle_truefalse(&args),
        },
        Err(err) => report_parse_error(err),
    }
}

pub fn run_check_with_args(args: &[String]) -> i32 {
    match CheckArgs::try_parse_from(args) {
        Ok(args) => handle_check(&args),
        Err(err) => report_parse_error(err),
    }
}

pub fn run_truefalse_with_args(args: &[String]) -> i32 {
    match TrueFalseArgs::try_parse_from(args) {
        Ok(args) => handle_truefalse(&args),
        Err(err) => report_parse_error(err),
    }
}

fn report_parse_error(err: clap::Error) -> i32 {
    let _ = err.print();
    err.exit_code()
}

fn handle_check(args: &CheckArgs) -> i32 {
    logging::init();
    match run_check(&args.root) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn handle_truefalse(args: &TrueFalseArgs) -> i32 {
    logging::init();
    let settings = match args.settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    match run_truefalse(&args.root, settings.policy, settings.dry_run) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}
