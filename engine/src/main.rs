use std::io::{self, BufRead, Write};
use std::str::FromStr;

use datepicker_engine::{CalendarDate, DateBounds, DatePicker, EventLog, PickerEvent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Type(String),
    Pick(CalendarDate),
    Clear,
    NextMonth,
    PreviousMonth,
    NextYear,
    PreviousYear,
    Year(i32),
    Today,
    Bounds(DateBounds),
    Show,
    Json,
    Help,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let command = match word {
            "type" => Command::Type(rest.to_string()),
            "pick" => Command::Pick(parse_date(rest)?),
            "clear" => Command::Clear,
            "next" => Command::NextMonth,
            "prev" => Command::PreviousMonth,
            "next-year" => Command::NextYear,
            "prev-year" => Command::PreviousYear,
            "year" => Command::Year(
                rest.trim()
                    .parse()
                    .map_err(|_| format!("not a year: {}", rest.trim()))?,
            ),
            "today" => Command::Today,
            "bounds" => {
                let mut parts = rest.split_whitespace();
                let min = parse_bound(parts.next())?;
                let max = parse_bound(parts.next())?;
                Command::Bounds(DateBounds { min, max })
            }
            "show" | "" => Command::Show,
            "json" => Command::Json,
            "help" => Command::Help,
            other => return Err(format!("unknown command `{other}` (try `help`)")),
        };
        Ok(command)
    }
}

fn parse_date(raw: &str) -> Result<CalendarDate, String> {
    raw.parse()
        .map_err(|_| format!("expected a YYYY-MM-DD date, got `{}`", raw.trim()))
}

fn parse_bound(raw: Option<&str>) -> Result<Option<CalendarDate>, String> {
    match raw {
        None | Some("-") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

const HELP: &str = "commands: type <text> | pick <YYYY-MM-DD> | clear | next | prev | \
next-year | prev-year | year <n> | today | bounds <min|-> <max|-> | show | json | help";

fn apply(
    picker: &mut DatePicker<EventLog>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Type(text) => picker.on_text_changed(&text),
        Command::Pick(date) => picker.on_cell_picked(date),
        Command::Clear => {
            if !picker.on_clear() {
                writeln!(out, "clear is not enabled")?;
            }
        }
        Command::NextMonth => {
            picker.next_month();
        }
        Command::PreviousMonth => {
            picker.previous_month();
        }
        Command::NextYear => report_year_navigation(picker.next_year(), out)?,
        Command::PreviousYear => report_year_navigation(picker.previous_year(), out)?,
        Command::Year(year) => report_year_navigation(picker.jump_to_year(year), out)?,
        Command::Today => {
            picker.go_to_today();
        }
        Command::Bounds(bounds) => {
            picker.on_bounds_changed(bounds);
            if let Some(warning) = picker.diagnostics() {
                writeln!(out, "warning: {warning}")?;
            }
        }
        Command::Show => {}
        Command::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&picker.snapshot())?)?;
            return Ok(());
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(());
        }
    }

    for event in picker.events_mut().take() {
        match event {
            PickerEvent::Change(Some(date)) => writeln!(out, "change: {date}")?,
            PickerEvent::Change(None) => writeln!(out, "change: (empty)")?,
            PickerEvent::ValidationError { message, .. } => writeln!(out, "error: {message}")?,
            PickerEvent::RequestClose => writeln!(out, "close requested")?,
        }
    }
    render(picker, out)
}

fn report_year_navigation(moved: bool, out: &mut impl Write) -> io::Result<()> {
    if !moved {
        writeln!(out, "year navigation is not enabled")?;
    }
    Ok(())
}

fn render(picker: &DatePicker<EventLog>, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{:^27}", picker.anchor_label())?;
    writeln!(out, " {}", picker.weekday_labels().join("  "))?;
    for week in picker.grid().chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                let marker = if cell.is_selected {
                    '>'
                } else if cell.is_today {
                    '*'
                } else if !cell.selectable {
                    'x'
                } else {
                    ' '
                };
                if cell.in_current_month {
                    format!("{marker}{:>2}", cell.date.day())
                } else {
                    format!("{marker} .")
                }
            })
            .collect();
        writeln!(out, "{}", row.join(" "))?;
    }
    writeln!(out, "input: [{}]", picker.display_text())?;
    if let Some(message) = picker.validation_message() {
        writeln!(out, "message: {message}")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datepicker_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::load()?;
    tracing::info!(
        today = %config.today,
        min = ?config.options.bounds.min,
        max = ?config.options.bounds.max,
        display_format = %config.options.display_format,
        "Loaded configuration from environment/.env"
    );

    let mut picker = DatePicker::new(config.options, config.today, EventLog::new())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{HELP}")?;
    render(&picker, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.parse::<Command>() {
            Ok(command) => apply(&mut picker, command, &mut out)?,
            Err(message) => writeln!(out, "{message}")?,
        }
        out.flush()?;
    }

    Ok(())
}
