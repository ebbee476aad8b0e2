//! Appliance usage entry point: CLI wiring and config-driven report execution.

use std::process;

use tracing::error;
use tracing_subscriber::EnvFilter;

use appliance_usage::cli::{CliOptions, parse_args, print_usage};
use appliance_usage::config::{ConfigError, ReportConfig};
use appliance_usage::io::export::export_csv;
use appliance_usage::runner::run_report;
use appliance_usage::usage::{DayError, UsageProfile};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the configuration source and applies command-line overrides.
fn load_config(cli: &CliOptions) -> Result<ReportConfig, ConfigError> {
    // --scenario takes priority, then --preset, then a bare default
    let mut cfg = if let Some(ref path) = cli.scenario {
        ReportConfig::from_toml_file(path)?
    } else if let Some(ref name) = cli.preset {
        ReportConfig::from_preset(name)?
    } else {
        ReportConfig {
            report: Default::default(),
            profile: UsageProfile::default(),
        }
    };

    if let Some(ref path) = cli.profile {
        cfg.profile = UsageProfile::from_json_file(path).map_err(|e| ConfigError {
            field: "profile".to_string(),
            message: format!("cannot load \"{}\": {e}", path.display()),
        })?;
    }
    if let Some(ref metric) = cli.metric {
        cfg.report.metric = metric.clone();
    }
    if let Some(ref scope) = cli.scope {
        cfg.report.scope = scope.clone();
    }
    if let Some(ref day) = cli.day {
        cfg.report.day = day.trim().parse::<f64>().map_err(|_| ConfigError {
            field: "report.day".to_string(),
            message: DayError::NotInteger.to_string(),
        })?;
    }

    Ok(cfg)
}

fn main() {
    init_tracing();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };

    let cfg = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // validate() already checked both, so these only fail on a logic error
    let (metric, scope) = match (cfg.metric(), cfg.scope()) {
        (Ok(metric), Ok(scope)) => (metric, scope),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let output = match run_report(&cfg.profile, metric, scope) {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, "report failed");
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    println!("{output}");

    if let Some(ref path) = cli.report_out {
        if let Err(e) = export_csv(&output, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Report written to {}", path.display());
    }

    if cli.serve {
        serve(cli.port);
    }
}

#[cfg(feature = "api")]
fn serve(port: u16) {
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(appliance_usage::api::serve(addr)) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve(_port: u16) {
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}
