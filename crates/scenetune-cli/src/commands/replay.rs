use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use scenetune_core::config::{QuantBiasOverride, SceneMode, TuneConfig};
use scenetune_core::feedback::Trace;
use scenetune_core::profile::ProfileTable;
use scenetune_core::session::{FrameReport, TuneSession};
use scenetune_core::sink::RecordingSink;

use crate::summary::{print_fields, print_frame_table, print_replay_header, print_trace_summary};

#[derive(Clone, Copy, ValueEnum)]
pub enum SceneModeArg {
    Surveillance,
    General,
}

impl From<SceneModeArg> for SceneMode {
    fn from(arg: SceneModeArg) -> Self {
        match arg {
            SceneModeArg::Surveillance => SceneMode::Surveillance,
            SceneModeArg::General => SceneMode::General,
        }
    }
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Feedback trace files (TOML)
    #[arg(required = true)]
    pub traces: Vec<PathBuf>,

    /// Tuning config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Profile table file (TOML) replacing the built-in table
    #[arg(long)]
    pub profiles: Option<PathBuf>,

    /// Scene mode
    #[arg(long, value_enum)]
    pub scene_mode: Option<SceneModeArg>,

    /// Pin every frame to the quality-priority profile
    #[arg(long)]
    pub quality_priority: bool,

    /// Leave adaptive filter weights untouched
    #[arg(long)]
    pub suppress_atf: bool,

    /// Explicit intra quantization bias
    #[arg(long)]
    pub qbias_i: Option<i32>,

    /// Explicit inter quantization bias
    #[arg(long)]
    pub qbias_p: Option<i32>,

    /// Print the decision for every frame
    #[arg(long)]
    pub frames: bool,

    /// Print the encoder fields applied for the last frame
    #[arg(long)]
    pub fields: bool,
}

/// Outcome of replaying one trace file.
pub struct TraceReplay {
    pub path: PathBuf,
    pub reports: Vec<FrameReport>,
    pub sink: RecordingSink,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let config = build_config(args)?;
    config.validate().context("Invalid tuning config")?;
    let table = Arc::new(load_profiles(args.profiles.as_deref())?);

    let traces: Vec<(PathBuf, Trace)> = args
        .traces
        .iter()
        .map(|path| -> Result<(PathBuf, Trace)> { Ok((path.clone(), load_trace(path)?)) })
        .collect::<Result<_>>()?;
    let total_frames: usize = traces.iter().map(|(_, t)| t.frames.len()).sum();

    print_replay_header(&config, traces.len(), total_frames);

    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:12} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Replaying");

    let replays: Vec<TraceReplay> = traces
        .into_par_iter()
        .map(|(path, trace)| -> Result<TraceReplay> {
            let mut session = TuneSession::new(config.clone(), Arc::clone(&table))?;
            let mut sink = RecordingSink::new();
            let reports = trace
                .frames
                .iter()
                .map(|feedback| {
                    let report = session.process_frame(feedback, &mut sink);
                    pb.inc(1);
                    report
                })
                .collect();
            Ok(TraceReplay {
                path,
                reports,
                sink,
            })
        })
        .collect::<Result<_>>()?;

    pb.finish_with_message("Done");

    for replay in &replays {
        print_trace_summary(replay);
        if args.frames {
            print_frame_table(&replay.reports);
        }
        if args.fields {
            print_fields(&replay.sink);
        }
    }

    Ok(())
}

fn build_config(args: &ReplayArgs) -> Result<TuneConfig> {
    let mut config: TuneConfig = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid tuning config")?
    } else {
        TuneConfig::default()
    };

    if let Some(mode) = args.scene_mode {
        config.scene_mode = mode.into();
    }
    if args.quality_priority {
        config.quality_priority = true;
    }
    if args.suppress_atf {
        config.suppress_adaptive_filter = true;
    }
    if args.qbias_i.is_some() || args.qbias_p.is_some() {
        config.qbias = Some(QuantBiasOverride {
            intra: args.qbias_i,
            inter: args.qbias_p,
        });
    }
    Ok(config)
}

fn load_profiles(path: Option<&Path>) -> Result<ProfileTable> {
    let Some(path) = path else {
        return Ok(ProfileTable::builtin());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profiles {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Invalid profile table {}", path.display()))
}

fn load_trace(path: &Path) -> Result<Trace> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Invalid trace {}", path.display()))
}
