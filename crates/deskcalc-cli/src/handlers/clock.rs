//! Clock command handler

use std::time::Duration;

use deskcalc::clock::{ClockReading, WorldClock};
use tracing::{debug, info, warn};

use crate::commands::ClockArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Printer;

/// Refresh period of a live clock
pub const REFRESH_PERIOD: Duration = Duration::from_secs(1);

/// Builds the clock for a run: the given zones (or the defaults), the
/// configured hour format, and the local zone when it names a real zone.
///
/// Without a configured local zone the system zone is used, if it can be
/// found.
pub fn build_clock(config: &CliConfig, zones: &[String]) -> CliResult<WorldClock> {
    build_clock_with(config, zones, || iana_time_zone::get_timezone().ok())
}

/// [`build_clock`] with the system zone lookup supplied by the caller
pub fn build_clock_with<F>(
    config: &CliConfig,
    zones: &[String],
    detect_zone: F,
) -> CliResult<WorldClock>
where
    F: FnOnce() -> Option<String>,
{
    let clock = if zones.is_empty() {
        WorldClock::new()
    } else {
        WorldClock::with_zones(zones)?
    };
    let clock = clock.with_24_hour(config.hour24);

    let (zone, configured) = match config.local_zone.clone() {
        Some(zone) => (zone, true),
        None => match detect_zone() {
            Some(zone) => (zone, false),
            None => {
                debug!("no local zone found");
                return Ok(clock);
            }
        },
    };

    match clock.clone().with_local_zone(&zone) {
        Ok(clock) => Ok(clock),
        Err(err) => {
            // TZ often holds POSIX rules rather than an IANA name
            warn!(%zone, configured, %err, "ignoring local zone");
            Ok(clock)
        }
    }
}

/// Execute the clock command
pub fn execute_clock(config: &CliConfig, args: &ClockArgs) -> CliResult<()> {
    let clock = build_clock(config, &args.zones)?;
    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());
    let json = args.json;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Io)?;

    if !json && args.ticks != Some(1) {
        printer.header(clock.format_label());
    }

    let mut failure = None;
    let mut sink = |readings: &[ClockReading]| {
        if json {
            match serde_json::to_string(readings) {
                Ok(line) => printer.raw(&line),
                Err(err) => failure = Some(err),
            }
        } else {
            printer.clock_table(readings);
        }
    };

    let renders = runtime.block_on(clock.run(&mut sink, REFRESH_PERIOD, args.ticks, async {
        // A failed handler install means Ctrl-C falls back to the default
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    }));
    info!(renders, "clock stopped");

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_clock_defaults() {
        let clock = build_clock(&CliConfig::new(), &[]).unwrap();
        assert_eq!(clock.zones().len(), 4);
        assert!(!clock.is_24_hour());
    }

    #[test]
    fn test_build_clock_with_zones_and_format() {
        let config = CliConfig::new().with_24_hour(true);
        let zones = vec!["UTC".to_string(), "Asia/Tokyo".to_string()];
        let clock = build_clock(&config, &zones).unwrap();
        assert_eq!(clock.zones(), vec!["UTC", "Asia/Tokyo"]);
        assert!(clock.is_24_hour());
    }

    #[test]
    fn test_build_clock_rejects_unknown_zone() {
        let zones = vec!["Mars/Base".to_string()];
        assert!(matches!(
            build_clock(&CliConfig::new(), &zones),
            Err(CliError::Clock(_))
        ));
    }

    #[test]
    fn test_build_clock_rejects_duplicate_zone() {
        let zones = vec!["UTC".to_string(), "UTC".to_string()];
        assert!(build_clock(&CliConfig::new(), &zones).is_err());
    }

    #[test]
    fn test_build_clock_ignores_posix_local_zone() {
        let config = CliConfig::new().with_local_zone(Some(":/etc/localtime"));
        let zones = vec!["UTC".to_string()];
        let clock = build_clock(&config, &zones).unwrap();
        assert_eq!(clock.zones(), vec!["UTC"]);
    }

    #[test]
    fn test_build_clock_marks_local_zone() {
        let config = CliConfig::new().with_local_zone(Some("UTC"));
        let zones = vec!["UTC".to_string(), "Asia/Tokyo".to_string()];
        let clock = build_clock(&config, &zones).unwrap();
        let readings = clock.snapshot(chrono::Utc::now());
        assert!(readings[0].is_local);
        assert!(!readings[1].is_local);
    }

    // ===== System zone fallback =====

    fn utc_and_tokyo() -> Vec<String> {
        vec!["UTC".to_string(), "Asia/Tokyo".to_string()]
    }

    #[test]
    fn test_build_clock_falls_back_to_system_zone() {
        let clock =
            build_clock_with(&CliConfig::new(), &utc_and_tokyo(), || Some("Asia/Tokyo".into()))
                .unwrap();
        let readings = clock.snapshot(chrono::Utc::now());
        assert!(!readings[0].is_local);
        assert!(readings[1].is_local);
    }

    #[test]
    fn test_build_clock_configured_zone_wins() {
        let config = CliConfig::new().with_local_zone(Some("UTC"));
        let clock = build_clock_with(&config, &utc_and_tokyo(), || {
            panic!("system zone looked up despite a configured zone")
        })
        .unwrap();
        let readings = clock.snapshot(chrono::Utc::now());
        assert!(readings[0].is_local);
        assert!(!readings[1].is_local);
    }

    #[test]
    fn test_build_clock_ignores_unknown_system_zone() {
        let clock =
            build_clock_with(&CliConfig::new(), &utc_and_tokyo(), || Some("Mars/Base".into()))
                .unwrap();
        let readings = clock.snapshot(chrono::Utc::now());
        assert!(readings.iter().all(|reading| !reading.is_local));
    }

    #[test]
    fn test_build_clock_without_system_zone() {
        let clock = build_clock_with(&CliConfig::new(), &utc_and_tokyo(), || None).unwrap();
        assert_eq!(clock.zones(), vec!["UTC", "Asia/Tokyo"]);
        let readings = clock.snapshot(chrono::Utc::now());
        assert!(readings.iter().all(|reading| !reading.is_local));
    }
}
