use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::controller::{self, AppState, Intent};
use crate::filter::PopulationBand;
use crate::render::{self, Key};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Dispatch(Intent),
    Open(usize, Key),
    List,
    Regions,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  search <text>        filter by name (empty text clears)
  region <name|all>    filter by region
  population <band>    all, lt1m, 1m-10m, gt10m
  page <n>             jump to page n
  next / prev          move one page
  open <n> [key]       press a key on card n (enter or space opens it)
  theme                toggle light/dark
  regions              list known regions
  list                 redraw the current page
  help                 show this help
  quit                 leave";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let cmd = match head.to_lowercase().as_str() {
        "search" | "s" | "/" => Command::Dispatch(Intent::SetText(rest.to_string())),
        "region" | "r" => {
            let region = match rest.to_lowercase().as_str() {
                "" | "all" => None,
                _ => Some(rest.to_string()),
            };
            Command::Dispatch(Intent::SetRegion(region))
        }
        "population" | "pop" | "p" => {
            let band = PopulationBand::parse(rest)
                .ok_or_else(|| format!("invalid population band '{rest}'"))?;
            Command::Dispatch(Intent::SetPopulationBand(band))
        }
        "page" | "g" => Command::Dispatch(Intent::GoToPage(parse_number(rest)?)),
        "next" | "n" | "»" => Command::Dispatch(Intent::NextPage),
        "prev" | "previous" | "b" | "«" => Command::Dispatch(Intent::PrevPage),
        "theme" | "t" => Command::Dispatch(Intent::ToggleTheme),
        "open" | "o" => {
            let (position, key) = match rest.split_once(char::is_whitespace) {
                Some((n, key)) => (
                    parse_number(n)?,
                    Key::parse(key).ok_or_else(|| format!("unknown key '{}'", key.trim()))?,
                ),
                None => (parse_number(rest)?, Key::Enter),
            };
            Command::Open(position, key)
        }
        "list" | "ls" | "l" => Command::List,
        "regions" => Command::Regions,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "" => return Err("empty command".to_string()),
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(cmd)
}

fn parse_number(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| format!("expected a number, got '{raw}'"))
}

fn print_status<W: Write>(out: &mut W, state: &AppState<'_>) -> io::Result<()> {
    let region = state.criteria.region.as_deref().unwrap_or("all");
    writeln!(
        out,
        "{} search='{}' region={} population={} | {} of {} countries | [{}]",
        "::".bold(),
        state.criteria.text,
        region,
        state.criteria.band,
        state.view.filtered.len(),
        state.dataset().len(),
        state.theme.toggle_label()
    )
}

fn redraw<W: Write>(out: &mut W, state: &AppState<'_>) -> io::Result<()> {
    print_status(out, state)?;
    write!(out, "{}", state.screen())
}

/// Reads commands until `quit` or end of input and returns the final state.
pub fn run<'a, R: BufRead, W: Write>(
    mut state: AppState<'a>,
    input: R,
    mut out: W,
) -> io::Result<AppState<'a>> {
    redraw(&mut out, &state)?;
    write!(out, "{} ", ">".bold())?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(out, "{} ", ">".bold())?;
            out.flush()?;
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(out, "{HELP}")?,
            Ok(Command::List) => redraw(&mut out, &state)?,
            Ok(Command::Regions) => {
                let regions = crate::filter::regions(state.dataset());
                writeln!(out, "{}", regions.join(", "))?;
            }
            Ok(Command::Open(position, key)) => {
                let screen = state.screen();
                match screen.cards().iter().find(|c| c.position == position) {
                    Some(card) => match card.on_key(key) {
                        Some(detail) => {
                            write!(out, "{}", render::themed_detail(&detail, state.theme))?
                        }
                        None => writeln!(out, "{}", format!("{key:?} does not open a card").yellow())?,
                    },
                    None => writeln!(out, "{}", format!("no card {position} on this page").yellow())?,
                }
            }
            Ok(Command::Dispatch(intent)) => {
                state = controller::reduce(state, intent);
                redraw(&mut out, &state)?;
            }
            Err(e) => writeln!(out, "{}", e.red())?,
        }
        write!(out, "{} ", ">".bold())?;
        out.flush()?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterCriteria;
    use crate::model::Country;
    use crate::render::Theme;
    use std::io::Cursor;

    fn data() -> Vec<Country> {
        (0..30)
            .map(|i| Country {
                cca3: format!("C{i:02}"),
                common_name: Some(format!("Land {i}")),
                region: Some("Europe".to_string()),
                population: Some(2_000_000),
                ..Country::default()
            })
            .collect()
    }

    #[test]
    fn parses_filter_commands() {
        assert_eq!(
            parse_command("search  ice land ").unwrap(),
            Command::Dispatch(Intent::SetText("ice land".to_string()))
        );
        assert_eq!(
            parse_command("search").unwrap(),
            Command::Dispatch(Intent::SetText(String::new()))
        );
        assert_eq!(
            parse_command("region Europe").unwrap(),
            Command::Dispatch(Intent::SetRegion(Some("Europe".to_string())))
        );
        assert_eq!(
            parse_command("region all").unwrap(),
            Command::Dispatch(Intent::SetRegion(None))
        );
        assert_eq!(
            parse_command("population gt10m").unwrap(),
            Command::Dispatch(Intent::SetPopulationBand(PopulationBand::OverTenMillion))
        );
    }

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(parse_command("page 3").unwrap(), Command::Dispatch(Intent::GoToPage(3)));
        assert_eq!(parse_command("next").unwrap(), Command::Dispatch(Intent::NextPage));
        assert_eq!(parse_command("prev").unwrap(), Command::Dispatch(Intent::PrevPage));
        assert_eq!(parse_command("open 2").unwrap(), Command::Open(2, Key::Enter));
        assert_eq!(parse_command("open 2 space").unwrap(), Command::Open(2, Key::Space));
        assert_eq!(parse_command("o 4 esc").unwrap(), Command::Open(4, Key::Escape));
        assert_eq!(parse_command("THEME").unwrap(), Command::Dispatch(Intent::ToggleTheme));
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("page x").is_err());
        assert!(parse_command("population lots").is_err());
        assert!(parse_command("fly").is_err());
        assert!(parse_command("open 2 tab key").is_err());
    }

    #[test]
    fn session_applies_commands_in_order() {
        let data = data();
        let state = AppState::new(&data, FilterCriteria::default(), 20, Theme::Light);
        let input = Cursor::new("next\nbogus\nsearch land 2\ntheme\nquit\nnext\n");
        let mut out = Vec::new();
        let state = run(state, input, &mut out).unwrap();
        assert_eq!(state.criteria.text, "land 2");
        assert_eq!(state.view.current_page, 1);
        assert_eq!(state.theme, Theme::Dark);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unknown command 'bogus'"));
    }

    #[test]
    fn open_prints_the_detail_of_that_card() {
        let data = data();
        let state = AppState::new(&data, FilterCriteria::default(), 20, Theme::Light);
        let mut out = Vec::new();
        run(state, Cursor::new("open 2\nopen 40\n"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Land 1"));
        assert!(text.contains("Official Name"));
        assert!(text.contains("no card 40 on this page"));
    }

    #[test]
    fn space_opens_and_other_keys_do_not() {
        let data = data();
        let state = AppState::new(&data, FilterCriteria::default(), 20, Theme::Light);
        let mut out = Vec::new();
        run(state, Cursor::new("open 3 space
open 4 esc
open 5 x
"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Official Name").count(), 1);
        assert!(text.contains("Land 2"));
        assert!(text.contains("Escape does not open a card"));
        assert!(text.contains("Char('x') does not open a card"));
    }
}
