use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use predictwell_scoring::{
    assess_eldercare, assess_pitcher, assess_portal_intake, project_trajectory, regional_scores,
    wellness_risk, BandTable, DailySignals, EldercareCheckIn, PitcherInput, PitcherIntake,
    PortalAssessment, PortalIntake, RiskBand, ScoringError, SignalWeights, Trajectory,
    WellnessInput,
};
use predictwell_trend::{
    analyze, smoothed_series, validate_series, ConfigError, TrendConfig, TrendError, TrendReport,
};

mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "predictwell",
    version,
    about = "Score health and workload check-ins and report risk trends",
    long_about = "predictwell scores eldercare, pitcher and wellness check-ins and analyzes\n\
        a subject's history of normalized risk scores.\n\n\
        Inputs are JSON files; omit the path or pass '-' to read stdin.\n\n\
        EXAMPLES:\n\
        \n  predictwell trend scores.json               Smoothed score, forecast and drift\n\
        \n  predictwell trend --horizon 7 --json h.json  Seven-day forecast as JSON\n\
        \n  predictwell eldercare checkin.json          Fall/cognition risk\n\
        \n  predictwell portal intake.json              Portal fall risk and 28-day outlook\n\
        \n  predictwell daily --weights w.toml days.json Daily index series and its trend"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Smooth, forecast and check a score history for upward drift
    Trend(TrendArgs),
    /// Score an eldercare fall/cognition check-in
    Eldercare(CheckInArgs),
    /// Score a pitcher's workload session
    Pitcher(CheckInArgs),
    /// Regional fatigue scores from a detailed pitcher intake
    Intake(CheckInArgs),
    /// Fall-risk index and 14/28-day outlook for a patient or clinician portal check-in
    Portal(CheckInArgs),
    /// Logistic wellness risk from workload, sleep and stress
    Wellness(CheckInArgs),
    /// Turn daily signal records into a weighted index series and analyze it
    Daily(DailyArgs),
}

#[derive(Debug, Args)]
struct TrendArgs {
    /// JSON array of scores in [0, 1], or {"scores": [...]}
    input: Option<PathBuf>,
    /// TOML file with alpha, horizon and [drift] settings
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    alpha: Option<f64>,
    #[arg(long)]
    horizon: Option<usize>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CheckInArgs {
    input: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct DailyArgs {
    /// JSON array of daily signal records, oldest first
    input: Option<PathBuf>,
    /// Signal weight table (.toml or .json)
    #[arg(long)]
    weights: Option<PathBuf>,
    /// TOML band table (`[[bands]]` with lo, hi, band)
    #[arg(long)]
    bands: Option<PathBuf>,
    /// TOML trend config applied to the index series
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {what}: {source}")]
    Io {
        what: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid score history: {0}")]
    Series(#[from] TrendError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl CliError {
    /// 1 for input that was read but rejected, 2 for input that could not be read or parsed.
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Series(_) | CliError::Config(ConfigError::Invalid { .. }) => 1,
            CliError::Scoring(ScoringError::OutOfRange { .. })
            | CliError::Scoring(ScoringError::UnknownLevel(_))
            | CliError::Scoring(ScoringError::InvalidWeight { .. })
            | CliError::Scoring(ScoringError::InvalidBand { .. }) => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeriesInput {
    Bare(Vec<f64>),
    Wrapped { scores: Vec<f64> },
}

impl SeriesInput {
    fn into_scores(self) -> Vec<f64> {
        match self {
            SeriesInput::Bare(v) | SeriesInput::Wrapped { scores: v } => v,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DailyEntry {
    index: f64,
    /// Exponential moving average of the index up to and including this day.
    smoothed: f64,
    band: Option<RiskBand>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DailyReport {
    days: Vec<DailyEntry>,
    trend: TrendReport,
}

#[derive(Debug, Serialize)]
struct PortalReport {
    assessment: PortalAssessment,
    trajectory: Trajectory,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn read_input(input: &Option<PathBuf>) -> Result<String, CliError> {
    match input {
        Some(p) if p.as_os_str() != "-" => fs::read_to_string(p).map_err(|source| CliError::Io {
            what: format!("'{}'", p.display()),
            source,
        }),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Io {
                    what: "stdin".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, CliError> {
    Ok(serde_json::from_str(text)?)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}

fn load_trend_config(
    path: Option<&Path>,
    alpha: Option<f64>,
    horizon: Option<usize>,
) -> Result<TrendConfig, CliError> {
    let mut config = match path {
        Some(p) => TrendConfig::load(p)?,
        None => TrendConfig::default(),
    };
    if let Some(a) = alpha {
        log::info!("--alpha {a} overrides configured {}", config.alpha);
        config.alpha = a;
    }
    if let Some(h) = horizon {
        log::info!("--horizon {h} overrides configured {}", config.horizon);
        config.horizon = h;
    }
    config.validate()?;
    Ok(config)
}

fn run_trend(args: &TrendArgs, text: &str) -> Result<String, CliError> {
    let config = load_trend_config(args.config.as_deref(), args.alpha, args.horizon)?;
    let scores = parse_json::<SeriesInput>(text)?.into_scores();
    validate_series(&scores)?;
    let report = analyze(&scores, &config);
    emit(OutputMode::from_flag(args.json), &report, render::trend)
}

fn run_daily(args: &DailyArgs, text: &str) -> Result<String, CliError> {
    let weights = match &args.weights {
        Some(p) => SignalWeights::load(p)?,
        None => SignalWeights::default(),
    };
    let bands = match &args.bands {
        Some(p) => BandTable::load(p)?,
        None => BandTable::default(),
    };
    let config = load_trend_config(args.config.as_deref(), None, None)?;
    let days: Vec<DailySignals> = parse_json(text)?;

    let (series, day_bands): (Vec<f64>, Vec<Option<RiskBand>>) = days
        .iter()
        .map(|d| weights.score_banded(d, &bands))
        .unzip();
    let smoothed = smoothed_series(&series, config.alpha);
    let report = DailyReport {
        trend: analyze(&series, &config),
        days: series
            .iter()
            .zip(smoothed)
            .zip(day_bands)
            .map(|((&index, smoothed), band)| DailyEntry {
                index,
                smoothed,
                band,
            })
            .collect(),
    };
    emit(OutputMode::from_flag(args.json), &report, render::daily)
}

fn run_portal(args: &CheckInArgs, text: &str) -> Result<String, CliError> {
    let intake: PortalIntake = parse_json(text)?;
    let assessment = assess_portal_intake(&intake);
    let trajectory = project_trajectory(assessment.score, &intake);
    let report = PortalReport {
        assessment,
        trajectory,
    };
    emit(OutputMode::from_flag(args.json), &report, |r| {
        render::portal(&r.assessment, &r.trajectory)
    })
}

fn emit<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String, CliError> {
    match mode {
        OutputMode::Text => Ok(text(value)),
        OutputMode::Json => to_json(value),
    }
}

fn input_of(command: &Command) -> &Option<PathBuf> {
    match command {
        Command::Trend(a) => &a.input,
        Command::Daily(a) => &a.input,
        Command::Eldercare(a)
        | Command::Pitcher(a)
        | Command::Intake(a)
        | Command::Portal(a)
        | Command::Wellness(a) => &a.input,
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let text = read_input(input_of(&cli.command))?;
    match &cli.command {
        Command::Trend(args) => run_trend(args, &text),
        Command::Daily(args) => run_daily(args, &text),
        Command::Portal(args) => run_portal(args, &text),
        Command::Eldercare(args) => {
            let a = assess_eldercare(&parse_json::<EldercareCheckIn>(&text)?)?;
            emit(OutputMode::from_flag(args.json), &a, |a| {
                render::assessment("eldercare", a)
            })
        }
        Command::Pitcher(args) => {
            let a = assess_pitcher(&parse_json::<PitcherInput>(&text)?)?;
            emit(OutputMode::from_flag(args.json), &a, |a| {
                render::assessment("pitcher", a)
            })
        }
        Command::Intake(args) => {
            let s = regional_scores(&parse_json::<PitcherIntake>(&text)?);
            emit(OutputMode::from_flag(args.json), &s, render::regions)
        }
        Command::Wellness(args) => {
            let r = wellness_risk(&parse_json::<WellnessInput>(&text)?);
            emit(OutputMode::from_flag(args.json), &r, render::wellness)
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(&cli) {
        Ok(out) => {
            print!("{out}");
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

fn main() {
    std::process::exit(run_cli());
}
