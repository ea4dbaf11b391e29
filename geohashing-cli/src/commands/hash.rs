//! Hash command: compute the geohash for a position and date.

use console::style;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use geohashing::coord::Coordinate;
use geohashing::hash::GeohashResult;

use super::common::{resolve_date, resolve_mode, ModeArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the hash command.
pub struct HashArgs {
    pub latitude: f64,
    pub longitude: f64,
    pub date: Option<String>,
    pub mode: Option<ModeArg>,
}

/// Run the hash command.
pub fn run(args: HashArgs, verbose: bool) -> Result<(), CliError> {
    let position = Coordinate::new(args.latitude, args.longitude)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let date = resolve_date(args.date.as_deref())?;

    let runner = CliRunner::new(verbose)?;
    runner.log_startup("hash");

    let mode = resolve_mode(args.mode, runner.config().geohash.mode);
    let service = runner.create_service()?;

    let cancel = CancellationToken::new();
    let result = runner.block_on(async {
        let trigger = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling lookup");
                trigger.cancel();
            }
        });
        service
            .geohash_cancellable(&position, date, mode, &cancel)
            .await
    })?;

    print_result(&runner, &position, &result);
    Ok(())
}

fn print_result(runner: &CliRunner, position: &Coordinate, result: &GeohashResult) {
    let display = &runner.config().display;
    let distance = position.distance_to(&result.position);

    println!(
        "{} {}",
        style("Geohash for").bold(),
        style(result.date).bold()
    );
    println!(
        "  Target:    {}",
        style(display.coordinates.format(&result.position)).green()
    );
    println!("  Graticule: {}", result.graticule);
    println!(
        "  30W rule:  {}",
        if result.applies_w30_rule { "yes" } else { "no" }
    );
    println!(
        "  Distance:  {}",
        style(display.units.format_distance(distance)).cyan()
    );
}
