use std::env;
use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Debug)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub profile: Option<PathBuf>,
    pub metric: Option<String>,
    pub scope: Option<String>,
    pub day: Option<String>,
    pub report_out: Option<PathBuf>,
    pub serve: bool,
    pub port: u16,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut preset = None;
    let mut profile = None;
    let mut metric = None;
    let mut scope = None;
    let mut day = None;
    let mut report_out = None;
    let mut serve = false;
    let mut port = 3000;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--profile" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --profile (expected a JSON file path)",
                )?;
                if profile.replace(PathBuf::from(path)).is_some() {
                    return Err("--profile provided more than once".to_string());
                }
            }
            "--metric" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --metric (expected \"usage\" or \"savings\")",
                )?;
                metric = Some(name.to_string());
            }
            "--scope" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --scope (expected \"single\", \"day\" or \"month\")",
                )?;
                scope = Some(name.to_string());
            }
            "--day" => {
                i += 1;
                let value =
                    args.next_or_err(i, "missing value for --day (expected a day number)")?;
                day = Some(value.to_string());
            }
            "--report-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --report-out (expected a file path)",
                )?;
                if report_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--report-out provided more than once".to_string());
                }
            }
            "--serve" => serve = true,
            "--port" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                port = value
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{value}\" is not a valid u16"))?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if scenario.is_some() && preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if scenario.is_none() && preset.is_none() && profile.is_none() {
        preset = Some("weekday".to_string());
    }

    Ok(CliOptions {
        scenario,
        preset,
        profile,
        metric,
        scope,
        day,
        report_out,
        serve,
        port,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  appliance-usage [--scenario <path> | --preset <name>] [--profile <json>]\n\
         \x20                 [--metric usage|savings] [--scope single|day|month] [--day <n>]\n\
         \x20                 [--report-out <csv>] [--serve] [--port <u16>]"
    );
    eprintln!();
    eprintln!("Presets: always_on, weekday, auto_off, month (default: weekday)");
}

#[cfg(test)]
mod tests {
    use super::parse_args_from;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn supports_scenario_cli() {
        let opts = parse_args_from(args(&["--scenario", "report.toml"]))
            .expect("parse should succeed");
        assert_eq!(
            opts.scenario.as_deref().and_then(|p| p.to_str()),
            Some("report.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn defaults_to_weekday_preset() {
        let opts = parse_args_from(Vec::new()).expect("parse should succeed");
        assert_eq!(opts.preset.as_deref(), Some("weekday"));
        assert!(!opts.serve);
        assert_eq!(opts.port, 3000);
    }

    #[test]
    fn profile_alone_skips_default_preset() {
        let opts = parse_args_from(args(&["--profile", "month.json", "--scope", "month"]))
            .expect("parse should succeed");
        assert!(opts.preset.is_none());
        assert_eq!(opts.scope.as_deref(), Some("month"));
    }

    #[test]
    fn day_is_kept_verbatim_for_validation() {
        let opts = parse_args_from(args(&["--scope", "day", "--day", "1.5"]))
            .expect("parse should succeed");
        assert_eq!(opts.day.as_deref(), Some("1.5"));
    }

    #[test]
    fn scenario_and_preset_are_exclusive() {
        let err = parse_args_from(args(&["--scenario", "a.toml", "--preset", "month"]))
            .expect_err("parse should fail");
        assert!(err.contains("mutually exclusive"));
    }

    #[test]
    fn missing_value_is_reported() {
        let err = parse_args_from(args(&["--day"])).expect_err("parse should fail");
        assert!(err.contains("--day"));
    }

    #[test]
    fn rejects_bad_port_and_unknown_flags() {
        assert!(parse_args_from(args(&["--port", "http"])).is_err());
        assert!(parse_args_from(args(&["--verbose"])).is_err());
    }
}
