//! Text and JSON rendering of an [`Analysis`].

use std::io::{self, Write};

use clap::ValueEnum;
use kolstat_core::analysis::{InitiativeEstimate, ItemReport, MonsterReport};
use kolstat_core::{Analysis, AnalysisConfig};
use kolstat_types::formatting::{
    format_avg_range, format_bound, format_count, format_decimal, format_rate, format_samples,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn write_report<W: Write>(
    out: &mut W,
    format: Format,
    analysis: &Analysis,
    config: &AnalysisConfig,
    generated: &str,
) -> io::Result<()> {
    match format {
        Format::Text => write_text(out, analysis, config, generated),
        Format::Json => write_json(out, analysis),
    }
}

pub fn write_json<W: Write>(out: &mut W, analysis: &Analysis) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, analysis)?;
    writeln!(out)
}

pub fn write_text<W: Write>(
    out: &mut W,
    analysis: &Analysis,
    config: &AnalysisConfig,
    generated: &str,
) -> io::Result<()> {
    let eu = config.report.european_numbers;

    writeln!(out, "kolstat | {}", generated)?;
    writeln!(out, "Analyzed {}", format_count(analysis.combats as u32, "combat"))?;

    writeln!(out)?;
    writeln!(out, "Overview")?;
    writeln!(out, "========")?;
    for monster in &analysis.monsters {
        writeln!(out)?;
        write_overview(out, monster, eu)?;
    }

    if !analysis.noncombats.is_empty() {
        writeln!(out)?;
        writeln!(out, "Noncombats")?;
        writeln!(out, "==========")?;
        for (title, count) in &analysis.noncombats {
            writeln!(out, " {}: {}", title, count)?;
        }
    }

    if config.report.details {
        writeln!(out)?;
        writeln!(out, "Details")?;
        writeln!(out, "=======")?;
        for monster in &analysis.monsters {
            writeln!(out)?;
            write_details(out, monster, eu)?;
        }

        writeln!(out)?;
        writeln!(out, "Items")?;
        writeln!(out, "=====")?;
        for monster in &analysis.monsters {
            writeln!(out)?;
            write_item_details(out, monster, eu)?;
        }
    }

    writeln!(out)?;
    write_assumptions(out, config)?;

    if !analysis.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Warnings:")?;
        for warning in analysis.warnings.iter() {
            writeln!(out, " {}", warning)?;
        }
    }
    Ok(())
}

fn write_heading<W: Write>(out: &mut W, monster: &MonsterReport) -> io::Result<()> {
    writeln!(
        out,
        "{} ({} encountered, {} defeated)",
        monster.name, monster.encountered, monster.defeated
    )
}

fn initiative_line(init: &InitiativeEstimate) -> Option<String> {
    if init.is_unknown() {
        return None;
    }
    let guess = init.guess.map_or_else(|| "?".to_string(), |g| g.to_string());
    Some(format!(
        "init: {} [{} .. {}]",
        guess,
        format_bound(init.lower),
        format_bound(init.upper)
    ))
}

fn item_line(item: &ItemReport, eu: bool) -> String {
    let mut line = format!(
        "{} {} ({}",
        format_rate(item.rate, eu),
        item.name,
        format_count(item.found, "drop")
    );
    if item.stolen > 0 {
        line += &format!(", {} stolen", item.stolen);
    }
    if item.misc > 0 {
        line += &format!(", {} other", item.misc);
    }
    line.push(')');
    line
}

fn write_overview<W: Write>(out: &mut W, monster: &MonsterReport, eu: bool) -> io::Result<()> {
    write_heading(out, monster)?;
    writeln!(out, " level: {}", monster.level)?;
    if let Some(stats) = &monster.stats {
        writeln!(
            out,
            " stats: {}",
            format_avg_range(stats.average, stats.min, stats.max, eu)
        )?;
    }
    if let Some(init) = initiative_line(&monster.initiative) {
        writeln!(out, " {}", init)?;
    }
    match &monster.meat {
        Some(meat) => writeln!(
            out,
            " meat: {}",
            format_avg_range(meat.average, meat.min, meat.max, eu)
        )?,
        None => writeln!(out, " meat: None")?,
    }
    for item in &monster.items {
        writeln!(out, " {}", item_line(item, eu))?;
    }
    Ok(())
}

fn write_details<W: Write>(out: &mut W, monster: &MonsterReport, eu: bool) -> io::Result<()> {
    write_heading(out, monster)?;
    if let Some(stats) = &monster.stats {
        writeln!(out, " Stats (avg {}):", format_decimal(stats.average, 1, eu))?;
        writeln!(out, " {}", format_samples(&monster.stat_samples, 2, eu))?;
    }
    if let Some(meat) = &monster.meat {
        writeln!(out, " Meat (avg {}):", format_decimal(meat.average, 1, eu))?;
        writeln!(out, " {}", format_samples(&monster.meat_samples, 2, eu))?;
    }
    let join = |inits: &[i64]| {
        inits
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(";")
    };
    if !monster.jump_inits.is_empty() {
        writeln!(out, " Got jump:")?;
        writeln!(out, " {}", join(&monster.jump_inits))?;
    }
    if !monster.jumped_inits.is_empty() {
        writeln!(out, " Got jumped:")?;
        writeln!(out, " {}", join(&monster.jumped_inits))?;
    }
    Ok(())
}

fn write_item_details<W: Write>(out: &mut W, monster: &MonsterReport, eu: bool) -> io::Result<()> {
    write_heading(out, monster)?;
    let join = |divisors: &[f64]| {
        divisors
            .iter()
            .map(|d| format_decimal(*d, 2, eu))
            .collect::<Vec<_>>()
            .join(" ")
    };
    for item in &monster.items {
        let trials = &item.trials;
        if !trials.dropped.is_empty() {
            writeln!(
                out,
                " ({}) {}: {}",
                item.name,
                format_count(trials.dropped.len() as u32, "drop"),
                join(&trials.dropped)
            )?;
        }
        if !trials.not_dropped.is_empty() {
            writeln!(
                out,
                " ({}) {}: {}",
                item.name,
                format_count(trials.not_dropped.len() as u32, "non-drop"),
                join(&trials.not_dropped)
            )?;
        }
        if trials.stolen > 0 {
            writeln!(out, " ({}) {} stolen", item.name, trials.stolen)?;
        }
    }
    Ok(())
}

fn write_assumptions<W: Write>(out: &mut W, config: &AnalysisConfig) -> io::Result<()> {
    let moon = format_decimal(config.main_stat_bonus * 100.0, 0, config.report.european_numbers);
    writeln!(
        out,
        "Monster levels are estimated with +stat bonuses and stat days factored in."
    )?;
    writeln!(out, "+exp bonus is assumed to be entirely general +stats and +ML.")?;
    writeln!(out, "Moon sign is assumed to give +{}% to your main stat.", moon)?;
    writeln!(
        out,
        "Other than moon sign and stat days, percentage bonuses to stat gains are not considered."
    )
}
