use clap::{crate_authors, crate_description, crate_version, Arg, ArgAction, Command};
use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::exit;

use porkbun_sync::common::{PromptSnafu, Result};
use porkbun_sync::plan::{Mode, Plan};
use porkbun_sync::porkbun::Porkbun;
use porkbun_sync::report::Verbosity;
use porkbun_sync::service::PorkbunSync;
use porkbun_sync::Config;
use snafu::ResultExt;

fn systemd_priority(level: log::Level) -> u8 {
    match level {
        log::Level::Error => 3,
        log::Level::Warn => 4,
        log::Level::Info => 6,
        log::Level::Debug => 7,
        log::Level::Trace => 7,
    }
}

fn setup_logger() {
    let filters = env::var("RUST_LOG").ok();

    // Adapted from env_logger examples. <3 Systemd support
    match env::var("RUST_LOG_STYLE") {
        Ok(s) if s == "SYSTEMD" => {
            let mut builder = env_logger::Builder::new();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    systemd_priority(record.level()),
                    record.target(),
                    record.args()
                )
            });
            match &filters {
                Some(f) => builder.parse_filters(f),
                None => builder.filter_level(log::LevelFilter::Info),
            };
            builder.init();
        }
        _ => {
            let mut builder = pretty_env_logger::formatted_builder();
            match &filters {
                Some(f) => builder.parse_filters(f),
                None => builder.filter_level(log::LevelFilter::Info),
            };
            builder.init();
        }
    };
}

fn confirm(_plan: &Plan) -> Result<bool> {
    print!("Would you like to proceed? [yN]: ");
    std::io::stdout().flush().context(PromptSnafu {
        message: "Failed to write prompt",
    })?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context(PromptSnafu {
            message: "Failed to read answer",
        })?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

pub(crate) fn main() {
    let cli = Command::new("porkbun-sync")
        .about(format!(
            "{}\n{}\n\n{}\n{}\n{}\n{}",
            crate_description!(),
            "Records are read from a YAML file; PORKBUN_* environment variables override it.",
            "  append  -- only create new records, leave existing ones unchanged",
            "  update  -- only update existing records, never create or remove",
            "  upgrade -- create and update records, never remove",
            "  replace -- make the provider match the configuration exactly",
        ))
        .arg(
            Arg::new("config")
                .required(true)
                .value_name("CONFIG_FILE")
                .help("YAML configuration file"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_parser(Mode::NAMES)
                .default_value("append")
                .help("Which operations may be performed"),
        )
        .arg(
            Arg::new("dry-run")
                .action(ArgAction::SetTrue)
                .short('n')
                .long("dry-run")
                .help("Perform a trial run without any changes made"),
        )
        .arg(
            Arg::new("verbose")
                .action(ArgAction::Count)
                .short('v')
                .long("verbose")
                .help("Output verbosity"),
        )
        .arg(
            Arg::new("yes")
                .action(ArgAction::SetTrue)
                .short('y')
                .long("yes")
                .help("Apply changes without asking for confirmation"),
        )
        .arg(
            Arg::new("check")
                .action(ArgAction::SetTrue)
                .short('t')
                .long("check")
                .help("Check the configuration"),
        )
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    let path: PathBuf = args
        .get_one::<String>("config")
        .expect("config is a required argument")
        .into();

    let (config, desired) = match Config::load(&path)
        .and_then(|config| config.desired_records().map(|desired| (config, desired)))
    {
        Ok(c) => c,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };

    if args.get_flag("check") {
        tracing::info!(
            domains = desired.len(),
            records = desired.values().map(Vec::len).sum::<usize>(),
            "Configuration is valid."
        );
        exit(0);
    }

    let mode: Mode = match args
        .get_one::<String>("mode")
        .expect("mode has a default value")
        .parse()
    {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };

    let dry_run = args.get_flag("dry-run");
    let mut verbosity = Verbosity(args.get_count("verbose"));
    if dry_run {
        tracing::info!("Dry run requested, enabling verbose output");
        verbosity = verbosity.max(Verbosity::OPERATIONS);
    }

    let service = match Porkbun::from_config(config.api) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };

    let sync = PorkbunSync::new(service, mode, verbosity);

    if let Err(err) = sync.check_connectivity() {
        tracing::error!("querying Porkbun API failed: {err}");
        exit(1);
    }

    let assume_yes = args.get_flag("yes");
    if let Err(err) = sync.sync(desired, dry_run, |plan| {
        if assume_yes {
            Ok(true)
        } else {
            confirm(plan)
        }
    }) {
        tracing::error!("{err}");
        exit(1);
    }
}
