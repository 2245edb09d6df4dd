use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{debug, info, warn};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::controller::{self, AppState, Intent};
use crate::filter::{FilterCriteria, PopulationBand};
use crate::model::Country;
use crate::output::{self, OutputFormat};
use crate::paginate::PAGE_SIZE;
use crate::render::{self, Theme};
use crate::source::{self, DataSource, FetchError};

fn print_banner() {
    const BANNER: &str = r#"
                      __                    __          __
  _________  __  ______  / /________  __  ____/ /__  _____/ /__
 / ___/ __ \/ / / / __ \/ __/ ___/ / / / / __  / _ \/ ___/ //_/
/ /__/ /_/ / /_/ / / / / /_/ /  / /_/ / / /_/ /  __/ /__/ ,<
\___/\____/\__,_/_/ /_/\__/_/   \__, /  \__,_/\___/\___/_/|_|
                               /____/
"#;
    let _ = write!(&mut rainbowcoat::stdout(), "{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug, PartialEq)]
struct RunConfig {
    source: DataSource,
    criteria: FilterCriteria,
    page: usize,
    page_size: usize,
    detail: Option<usize>,
    interactive: bool,
    theme: Theme,
    timeout: Option<u64>,
    proxy: Option<String>,
    output: Option<String>,
    output_format: OutputFormat,
    no_color: bool,
    verbose: u8,
}

fn resolve_source(args: &CliArgs, cfg: &ConfigFile) -> Result<DataSource, String> {
    if let Some(path) = args.input_file.as_deref() {
        return Ok(DataSource::File(config::expand_tilde_string(path)));
    }
    if let Some(url) = args.url.as_deref() {
        return Ok(DataSource::Url(url.trim().to_string()));
    }
    match (cfg.url.as_deref(), cfg.input_file.as_deref()) {
        (Some(_), Some(_)) => Err("use either url or input_file in the config, not both".to_string()),
        (None, Some(path)) => Ok(DataSource::File(config::expand_tilde_string(path))),
        (Some(url), None) => {
            reqwest::Url::parse(url).map_err(|e| format!("invalid url '{url}' in config: {e}"))?;
            Ok(DataSource::Url(url.trim().to_string()))
        }
        (None, None) => Ok(DataSource::default()),
    }
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let source = resolve_source(&args, &cfg)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let population_raw = args
        .population
        .or(cfg.population)
        .unwrap_or_else(|| "all".to_string());
    let band = PopulationBand::parse(&population_raw)
        .ok_or_else(|| format!("invalid population band '{population_raw}'"))?;

    let region = args
        .region
        .or(cfg.region)
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case("all"));

    let criteria = FilterCriteria {
        text: args.search.or(cfg.search).unwrap_or_default(),
        region,
        band,
    };

    let page_size = args.page_size.or(cfg.page_size).unwrap_or(PAGE_SIZE);
    if page_size == 0 {
        return Err("invalid page_size, expected positive integer".to_string());
    }

    let theme_raw = args.theme.or(cfg.theme).unwrap_or_else(|| "light".to_string());
    let theme = Theme::parse(&theme_raw).ok_or_else(|| format!("invalid theme '{theme_raw}'"))?;

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => {
            OutputFormat::parse(&raw).ok_or_else(|| format!("invalid output format '{raw}'"))?
        }
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    Ok(RunConfig {
        source,
        criteria,
        page: args.page.unwrap_or(1),
        page_size,
        detail: args.detail,
        interactive: args.interactive || cfg.interactive.unwrap_or(false),
        theme,
        timeout: args.timeout.or(cfg.timeout),
        proxy: args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty()),
        output,
        output_format,
        no_color,
        verbose: args.verbose,
    })
}

async fn fetch_dataset(run: &RunConfig) -> Result<Vec<Country>, FetchError> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(render::LOADING_MESSAGE);
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = source::load(&run.source, run.timeout, run.proxy.as_deref()).await;
    pb.finish_and_clear();
    result
}

/// The error screen is the only report of a failed fetch; the log line stays at debug.
fn report_fetch_error<W: Write>(out: &mut W, err: &FetchError, theme: Theme) -> io::Result<()> {
    debug!(error = %err, "fetch failed");
    write!(out, "{}", render::render_fetch_error(err, theme))?;
    out.flush()
}

fn write_output(path: &str, format: OutputFormat, state: &AppState<'_>) -> Result<(), String> {
    let rendered = output::render(format, state);
    std::fs::write(path, rendered).map_err(|e| format!("failed to write output file '{path}': {e}"))?;
    info!(path, ?format, "wrote output");
    Ok(())
}

fn run_view(run: &RunConfig, dataset: &[Country]) -> Result<(), String> {
    let mut state = AppState::new(dataset, run.criteria.clone(), run.page_size, run.theme);
    if run.page != 1 {
        let pages = state.view.page_count();
        state = controller::reduce(state, Intent::GoToPage(run.page));
        if state.view.current_page != run.page {
            warn!(requested = run.page, pages, "page out of range, showing page 1");
        }
    }

    let stdout = io::stdout();
    if run.interactive {
        print_banner();
        format_kv_line("Source", &source_label(&run.source));
        format_kv_line("Countries", &dataset.len().to_string());
        println!();
        state = crate::interactive::run(state, io::stdin().lock(), stdout.lock())
            .map_err(|e| format!("interactive session failed: {e}"))?;
    } else {
        let mut out = stdout.lock();
        let shown_detail = run.detail.and_then(|n| {
            let detail = state.select(n);
            if detail.is_none() {
                warn!(card = n, "no such card on this page");
            }
            detail
        });
        let text = match shown_detail {
            Some(detail) => render::themed_detail(&detail, state.theme),
            None => state.screen().to_string(),
        };
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| format!("failed to write to stdout: {e}"))?;
    }

    if let Some(path) = run.output.as_deref() {
        write_output(path, run.output_format, &state)?;
    }
    Ok(())
}

fn source_label(source: &DataSource) -> String {
    match source {
        DataSource::Url(url) => url.clone(),
        DataSource::File(path) => format!("file {path}"),
    }
}

pub fn run_cli() -> Result<ExitCode, String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                let mut cmd = CliArgs::command();
                print!("{}", cmd.render_long_help());
                return Ok(ExitCode::SUCCESS);
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(ExitCode::SUCCESS);
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));

    if args.write_config {
        let path = user_config_path
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not determine a home directory for the config".to_string())?;
        if config::write_default_config(&path)? {
            println!("wrote {}", path.display());
        } else {
            println!("{} already exists, left unchanged", path.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    if run.no_color {
        colored::control::set_override(false);
    }
    crate::logging::setup_logger(run.verbose, !run.no_color && io::stderr().is_terminal());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    let dataset = match rt.block_on(fetch_dataset(&run)) {
        Ok(dataset) => dataset,
        Err(e) => {
            report_fetch_error(&mut io::stdout().lock(), &e, run.theme)
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
            return Ok(ExitCode::FAILURE);
        }
    };

    run_view(&run, &dataset)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> CliArgs {
        let mut full = vec!["countrydeck"];
        full.extend_from_slice(extra);
        CliArgs::parse_from(full)
    }

    #[test]
    fn defaults_fetch_everything_from_the_public_endpoint() {
        let run = build_run_config(args(&[]), ConfigFile::default()).unwrap();
        assert_eq!(run.source, DataSource::default());
        assert!(run.criteria.is_empty());
        assert_eq!(run.page, 1);
        assert_eq!(run.page_size, PAGE_SIZE);
        assert_eq!(run.theme, Theme::Light);
        assert_eq!(run.output_format, OutputFormat::Text);
        assert!(!run.interactive);
    }

    #[test]
    fn cli_overrides_config() {
        let cfg = ConfigFile {
            search: Some("ice".to_string()),
            region: Some("Asia".to_string()),
            population: Some("gt10m".to_string()),
            page_size: Some(10),
            theme: Some("dark".to_string()),
            ..ConfigFile::default()
        };
        let run = build_run_config(args(&["-r", "Europe", "-p", "lt1m"]), cfg).unwrap();
        assert_eq!(run.criteria.text, "ice");
        assert_eq!(run.criteria.region.as_deref(), Some("Europe"));
        assert_eq!(run.criteria.band, PopulationBand::UnderOneMillion);
        assert_eq!(run.page_size, 10);
        assert_eq!(run.theme, Theme::Dark);
    }

    #[test]
    fn region_all_means_unset() {
        let run = build_run_config(args(&["-r", "all"]), ConfigFile::default()).unwrap();
        assert!(run.criteria.region.is_none());
    }

    #[test]
    fn input_file_beats_config_url() {
        let cfg = ConfigFile {
            url: Some("https://example.com/all".to_string()),
            ..ConfigFile::default()
        };
        let run = build_run_config(args(&["-i", "countries.json"]), cfg).unwrap();
        assert_eq!(run.source, DataSource::File("countries.json".to_string()));
    }

    #[test]
    fn config_with_both_sources_is_rejected() {
        let cfg = ConfigFile {
            url: Some("https://example.com/all".to_string()),
            input_file: Some("countries.json".to_string()),
            ..ConfigFile::default()
        };
        assert!(build_run_config(args(&[]), cfg).is_err());
    }

    #[test]
    fn output_format_is_inferred_from_extension() {
        let run = build_run_config(args(&["-o", "view.html"]), ConfigFile::default()).unwrap();
        assert_eq!(run.output_format, OutputFormat::Html);
        let run = build_run_config(args(&["-o", "view.html", "-A", "json"]), ConfigFile::default())
            .unwrap();
        assert_eq!(run.output_format, OutputFormat::Json);
    }

    #[test]
    fn fetch_failure_is_reported_exactly_once() {
        let err = FetchError::Status { status: 503 };
        let mut out = Vec::new();
        report_fetch_error(&mut out, &err, Theme::Light).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert_eq!(text.matches("Failed to load countries data:").count(), 1);
        assert!(text.contains("status 503"));
    }

    #[test]
    fn fetch_failure_is_below_the_default_log_level() {
        assert!(tracing::Level::DEBUG > crate::logging::level_for_verbosity(0));
    }

    #[test]
    fn color_flag_overrides_config_no_color() {
        let cfg = ConfigFile {
            no_color: Some(true),
            ..ConfigFile::default()
        };
        assert!(build_run_config(args(&[]), cfg.clone()).unwrap().no_color);
        assert!(!build_run_config(args(&["--color"]), cfg).unwrap().no_color);
    }
}
