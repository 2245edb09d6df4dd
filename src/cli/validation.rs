use crate::cli::args::CliArgs;
use crate::filter::PopulationBand;
use crate::output::OutputFormat;
use crate::render::Theme;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.population.as_deref() {
        PopulationBand::parse(raw).ok_or_else(|| {
            format!("invalid --population '{raw}': expected all, lt1m, 1m-10m or gt10m")
        })?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid --output-format '{raw}': expected text, json or html"))?;
    }
    if let Some(raw) = args.theme.as_deref() {
        Theme::parse(raw).ok_or_else(|| format!("invalid --theme '{raw}': expected light or dark"))?;
    }
    if let Some(raw) = args.url.as_deref() {
        reqwest::Url::parse(raw).map_err(|e| format!("invalid --url '{raw}': {e}"))?;
    }
    if args.url.is_some() && args.input_file.is_some() {
        return Err("use either --url or --input-file, not both".to_string());
    }
    if args.page == Some(0) {
        return Err("invalid --page, expected positive integer".to_string());
    }
    if args.page_size == Some(0) {
        return Err("invalid --page-size, expected positive integer".to_string());
    }
    if args.detail == Some(0) {
        return Err("invalid --detail, expected positive integer".to_string());
    }
    Ok(())
}
