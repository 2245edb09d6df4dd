use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "countrydeck",
    version,
    about = "browse the world's countries from the terminal",
    long_about = "countrydeck fetches the public country dataset once and lets you search, filter and page through it as a card grid.\n\nExamples:\n  countrydeck\n  countrydeck -q land -r Europe\n  countrydeck -p gt10m --page 2\n  countrydeck -q ice -d 1\n  countrydeck -I\n  countrydeck -r Asia -o asia.html\n\nTip: Use --config to persist defaults and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity on stderr (-v, -vv, -vvv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the current view to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html). Inferred from the file extension when omitted."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'u',
        long = "url",
        value_name = "URL",
        help_heading = "Input",
        help = "Endpoint returning the JSON array of countries."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'i',
        long = "input-file",
        value_name = "FILE",
        help_heading = "Input",
        help = "Read the countries from a local JSON file instead of the network."
    )]
    pub input_file: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.countrydeck/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "write-config",
        help_heading = "Input",
        help = "Write a commented default config (to --config or the default path) and exit. Existing files are left alone."
    )]
    pub write_config: bool,

    #[arg(
        short = 'q',
        long = "search",
        visible_alias = "query",
        value_name = "TEXT",
        help_heading = "Filters",
        help = "Case-insensitive substring of the country name."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'r',
        long = "region",
        value_name = "NAME",
        help_heading = "Filters",
        help = "Only show countries of this region (e.g. Africa, Americas, Asia, Europe, Oceania)."
    )]
    pub region: Option<String>,

    #[arg(
        short = 'p',
        long = "population",
        value_name = "BAND",
        help_heading = "Filters",
        help = "Population band: all, lt1m, 1m-10m, gt10m."
    )]
    pub population: Option<String>,

    #[arg(
        long = "page",
        value_name = "N",
        help_heading = "View",
        help = "Page to show (1-based)."
    )]
    pub page: Option<usize>,

    #[arg(
        long = "page-size",
        value_name = "N",
        help_heading = "View",
        help = "Cards per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'd',
        long = "detail",
        value_name = "N",
        help_heading = "View",
        help = "Show the detail view of the N-th card on the page."
    )]
    pub detail: Option<usize>,

    #[arg(
        short = 'I',
        long = "interactive",
        help_heading = "View",
        help = "Start an interactive prompt after the first render."
    )]
    pub interactive: bool,

    #[arg(
        long = "theme",
        value_name = "THEME",
        help_heading = "View",
        help = "Color theme (light or dark)."
    )]
    pub theme: Option<String>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds (0 = none)."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'x',
        long = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,
}
