// Console rendering of weather reports and per-record errors
use crate::domain::error::ReportError;
use crate::domain::report::{DetailedReport, WeatherReport};
use std::io::Write;

/// Write one report followed by a blank separator line.
pub fn write_report<W: Write>(out: &mut W, report: &WeatherReport) -> std::io::Result<()> {
    writeln!(
        out,
        "[Instant] Wind: {} m/s from {}°",
        report.instant_speed, report.instant_dir
    )?;
    writeln!(out, "[2 Min Avg] Wind: {} m/s", report.avg_2min_speed)?;
    writeln!(
        out,
        "Rain (1h): {} mm, Last rain: {} min ago",
        report.rain_1hr, report.last_rain
    )?;

    if let Some(detail) = &report.detail {
        write_detail(out, detail)?;
    }

    writeln!(out)?;
    out.flush()
}

fn write_detail<W: Write>(out: &mut W, detail: &DetailedReport) -> std::io::Result<()> {
    writeln!(
        out,
        "[2 Min Avg] Gust: {} m/s, Dir: {}°",
        detail.avg_2min.gust, detail.avg_2min.dir
    )?;
    for (label, reading) in [("10 Min Avg", &detail.avg_10min), ("Custom Avg", &detail.custom)] {
        writeln!(
            out,
            "[{}] Wind: {} m/s from {}°, Gust: {} m/s",
            label, reading.speed, reading.dir, reading.gust
        )?;
    }
    writeln!(
        out,
        "Rain (24h): {} mm, Total: {} mm",
        detail.rain_24hr, detail.rain_total
    )
}

/// Write a single error line for a record that could not be reported.
pub fn write_error<W: Write>(out: &mut W, err: &ReportError) -> std::io::Result<()> {
    writeln!(out, "{}", err)?;
    out.flush()
}
