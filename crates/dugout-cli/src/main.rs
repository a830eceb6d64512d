// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::{API_URL_ENV, Config, LOG_FILTER_ENV};
use dugout_app::{TableViewModel, ViewConfig};
use runtime::ApiRuntime;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `dugout --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let base_url = options
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_base_url());
    let page_size = options.page_size.unwrap_or_else(|| config.page_size());

    let client = dugout_api::Client::new(&base_url, config.api_timeout()?).with_context(|| {
        format!(
            "invalid API settings; fix [api] in {}, {API_URL_ENV}, or --api-url",
            options.config_path.display()
        )
    })?;

    if options.check_only {
        client
            .ping()
            .with_context(|| format!("check stats service at {}", client.base_url()))?;
        println!("ok: {} answered with a player stats page", client.base_url());
        return Ok(());
    }

    let log_path = init_logging(&config)?;
    info!(
        base_url = client.base_url(),
        page_size,
        log = %log_path.display(),
        "starting dugout"
    );

    let mut view = TableViewModel::new(ViewConfig {
        page_size,
        max_sort_keys: config.max_sort_keys(),
    });
    let mut runtime = ApiRuntime::new(client);
    dugout_tui::run_app(&mut view, &mut runtime)
}

/// Sends log output to a file; the terminal belongs to the table view.
fn init_logging(config: &Config) -> Result<PathBuf> {
    let path = config.log_file()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}; set [log].file", path.display()))?;

    tracing_subscriber::registry()
        .with(config.log_filter()?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("install log subscriber")?;
    Ok(path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    api_url: Option<String>,
    page_size: Option<u32>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        api_url: None,
        page_size: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--api-url" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--api-url requires a URL"))?;
                config::validate_base_url(value.as_ref()).context("--api-url")?;
                options.api_url = Some(value.as_ref().trim().to_owned());
            }
            "--page-size" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--page-size requires a number"))?;
                let size: u32 = value.as_ref().parse().with_context(|| {
                    format!("--page-size expects a whole number, got {:?}", value.as_ref())
                })?;
                config::validate_page_size(size).context("--page-size")?;
                options.page_size = Some(size);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("dugout: browse, sort, and edit player batting stats");
    println!("  --config <path>          Use a specific config path");
    println!("  --api-url <url>          Stats service base URL (overrides {API_URL_ENV})");
    println!("  --page-size <n>          Rows per page at startup");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and reach the stats service");
    println!("  --help                   Show this help");
    println!();
    println!("Logs go to [log].file; set {LOG_FILTER_ENV} to change the filter.");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/dugout-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                api_url: None,
                page_size: None,
                print_config_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(vec!["--api-url"], default_options_path())
            .expect_err("missing URL should fail");
        assert!(error.to_string().contains("--api-url requires a URL"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_reads_api_url_and_page_size() -> Result<()> {
        let options = parse_cli_args(
            vec!["--api-url", "http://stats.local:8000", "--page-size", "25"],
            default_options_path(),
        )?;
        assert_eq!(options.api_url.as_deref(), Some("http://stats.local:8000"));
        assert_eq!(options.page_size, Some(25));
        Ok(())
    }

    #[test]
    fn parse_cli_args_validates_api_url_and_page_size() {
        let error = parse_cli_args(vec!["--api-url", "stats.local"], default_options_path())
            .expect_err("schemeless URL should fail");
        assert!(format!("{error:#}").contains("http:// or https://"));

        let error = parse_cli_args(vec!["--page-size", "ten"], default_options_path())
            .expect_err("non-numeric page size should fail");
        assert!(error.to_string().contains("whole number"));

        let error = parse_cli_args(vec!["--page-size", "0"], default_options_path())
            .expect_err("zero page size should fail");
        assert!(format!("{error:#}").contains("between 1 and 1000"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
