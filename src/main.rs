use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser as _;
use sif_dates::{
    calendar::{format_iso_date, parse_iso_date},
    date_duration::{count_non_zero, dates_with_non_zero, filter_valid, summarize},
    date_range::{
        dates_in_range, days_between, gaps_between_ranges, iso_range_to_range, months_in_range,
        range_to_iso_range, ranges_collide, union_range, weeks_in_range,
    },
    duration::to_decimal,
    settings::Schedule,
    DateRange,
};

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Date range and duration calculations")]
struct Cli {
    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::Subcommand)]
enum Command {
    /// Split a range into ISO weeks
    Weeks {
        #[arg(value_parser = parse_iso_date)]
        from: NaiveDate,
        #[arg(value_parser = parse_iso_date)]
        to: NaiveDate,
    },
    /// Split a range into calendar months
    Months {
        #[arg(value_parser = parse_iso_date)]
        from: NaiveDate,
        #[arg(value_parser = parse_iso_date)]
        to: NaiveDate,
        #[arg(long)]
        full_months: bool,
    },
    /// List the days of a range
    Days {
        #[arg(value_parser = parse_iso_date)]
        from: NaiveDate,
        #[arg(value_parser = parse_iso_date)]
        to: NaiveDate,
        #[arg(long)]
        weekdays_only: bool,
    },
    /// Show collisions, union and gaps of `FROM/TO` ranges
    Gaps {
        #[arg(required = true, value_parser = iso_range_to_range)]
        ranges: Vec<DateRange>,
    },
    /// Summarize the durations of a schedule file
    Summary {
        path: PathBuf,
        #[arg(long, value_parser = parse_iso_date, requires = "to")]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_iso_date, requires = "from")]
        to: Option<NaiveDate>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("🛑 {:?}", err);
    }

    if let Err(err) = run(cli.command) {
        eprintln!("🛑 {:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Weeks { from, to } => {
            for week in weeks_in_range(&DateRange::new(from, to)?)? {
                println!("{}", range_to_iso_range(&week));
            }
        }
        Command::Months {
            from,
            to,
            full_months,
        } => {
            for month in months_in_range(&DateRange::new(from, to)?, full_months)? {
                println!("{}", range_to_iso_range(&month));
            }
        }
        Command::Days {
            from,
            to,
            weekdays_only,
        } => {
            let range = DateRange::new(from, to)?;
            for date in dates_in_range(&range, weekdays_only)? {
                println!("{}", format_iso_date(date));
            }
            println!("{} days", days_between(&range, weekdays_only)?);
        }
        Command::Gaps { ranges } => {
            println!("collide: {}", ranges_collide(&ranges, false));
            if let Some(union) = union_range(&ranges) {
                println!("union: {}", range_to_iso_range(&union));
            }
            for gap in gaps_between_ranges(&ranges) {
                println!("gap: {}", range_to_iso_range(&gap));
            }
        }
        Command::Summary { path, from, to } => {
            let schedule = Schedule::load(&path)?;
            let range = match (from, to) {
                (Some(from), Some(to)) => Some(DateRange::new(from, to)?),
                _ => None,
            };

            let durations = schedule.durations(range.as_ref())?;
            let invalid = durations.len() - filter_valid(&durations).len();
            if invalid > 0 {
                log::warn!("{} entries have invalid durations and count as zero", invalid);
            }

            let total = summarize(&durations);
            println!("total: {} ({} hours)", total, to_decimal(&total));
            println!("days with time: {}", count_non_zero(&durations));
            for date in dates_with_non_zero(&durations) {
                println!("  {}", date);
            }
        }
    }

    Ok(())
}
