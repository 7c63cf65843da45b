use console::Style;
use scenetune_core::classify::MotionLevel;
use scenetune_core::config::TuneConfig;
use scenetune_core::profile::ProfileIndex;
use scenetune_core::session::FrameReport;
use scenetune_core::sink::RecordingSink;

use crate::commands::replay::TraceReplay;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn on_off(s: &Styles, enabled: bool) -> String {
    if enabled {
        s.method.apply_to("on").to_string()
    } else {
        s.disabled.apply_to("off").to_string()
    }
}

pub fn print_replay_header(config: &TuneConfig, trace_count: usize, frame_count: usize) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Scene Tune Replay"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    println!(
        "  {:<18}{}",
        s.label.apply_to("Scene mode"),
        s.method.apply_to(config.scene_mode)
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Quality priority"),
        on_off(&s, config.quality_priority)
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Adaptive filter"),
        on_off(&s, !config.suppress_adaptive_filter)
    );
    match config.qbias {
        Some(bias) => {
            let (intra, inter) = bias.resolve();
            println!(
                "  {:<18}{}",
                s.label.apply_to("Quant bias"),
                s.value.apply_to(format!("I {intra} / P {inter}"))
            );
        }
        None => println!(
            "  {:<18}{}",
            s.label.apply_to("Quant bias"),
            s.disabled.apply_to("from profile")
        ),
    }
    println!(
        "  {:<18}{}",
        s.label.apply_to("Motion window"),
        s.value.apply_to(config.motion_window)
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Traces"),
        s.value.apply_to(format!("{trace_count} ({frame_count} frames)"))
    );
    println!();
}

pub fn print_trace_summary(replay: &TraceReplay) {
    let s = Styles::new();
    let reports = &replay.reports;

    println!("  {}", s.path.apply_to(replay.path.display()));

    let motion_frames = reports.iter().filter(|r| r.analysis.motion_flag).count();
    let skipped = reports.iter().filter(|r| r.profile.is_none()).count();
    println!(
        "    {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(reports.len())
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("In motion"),
        s.value.apply_to(motion_frames)
    );
    if skipped > 0 {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Skipped"),
            s.disabled.apply_to(skipped)
        );
    }

    println!("    {}", s.header.apply_to("Motion levels"));
    for level in [
        MotionLevel::Still,
        MotionLevel::Moderate,
        MotionLevel::Large,
        MotionLevel::Unknown,
    ] {
        let count = reports
            .iter()
            .filter(|r| r.analysis.motion.verdict.level == level)
            .count();
        println!(
            "      {:<12}{}",
            s.label.apply_to(level),
            s.value.apply_to(count)
        );
    }

    println!("    {}", s.header.apply_to("Profiles"));
    for index in ProfileIndex::ALL {
        let count = reports.iter().filter(|r| r.profile == Some(index)).count();
        println!(
            "      {:<24}{}",
            s.label.apply_to(index),
            s.value.apply_to(count)
        );
    }
    println!();
}

pub fn print_frame_table(reports: &[FrameReport]) {
    let s = Styles::new();

    println!(
        "    {}",
        s.header.apply_to(format!(
            "{:>6}  {:<9} {:>5} {:>4} {:>4}  {:<22} {:>4} {:>4}",
            "frame", "level", "score", "raw", "flag", "profile", "mot", "cpx"
        ))
    );
    for r in reports {
        let a = &r.analysis;
        let profile = r
            .profile
            .map_or_else(|| "skipped".to_string(), |p| p.to_string());
        println!(
            "    {:>6}  {:<9} {:>5} {:>4} {:>4}  {:<22} {:>4} {:>4}",
            r.frame,
            a.motion.verdict.level,
            a.motion.score,
            u8::from(a.motion.raw_flag),
            u8::from(a.motion_flag),
            profile,
            a.rate_control.motion_level,
            a.rate_control.complex_level,
        );
    }
    println!();
}

pub fn print_fields(sink: &RecordingSink) {
    let s = Styles::new();

    println!("    {}", s.header.apply_to("Applied fields"));
    for (field, values) in sink.iter() {
        println!("      {:<24}{:?}", s.label.apply_to(field), values);
    }
    println!();
}
