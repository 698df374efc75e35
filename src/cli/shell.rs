// Interactive line shell over a RecipeBrowser
use crate::api::models::RecipeId;
use crate::api::RecipeSource;
use crate::browser::{FilterField, PageLimit, PageNav, RecipeBrowser};
use crate::cli::commands::emit;
use crate::{Error, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Navigate(PageNav),
    Page(u32),
    Limit(PageLimit),
    Set(FilterField, String),
    Unset(FilterField),
    Filters,
    Search,
    Clear,
    Select(RecipeId),
    Deselect,
    Toggle,
    Reload,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  first | prev | next | last     move between pages
  page N                         load page N
  limit N                        rows per page (15, 20, 25, 30, 50)
  set FIELD VALUE                set a filter (title, cuisine, rating, total_time, calories)
  unset FIELD                    blank a filter
  filters                        show current filter values
  search                         run the search (all blank = first page)
  clear                          blank all filters and return to page 1
  select ID | deselect           focus a recipe from the list
  toggle                         show or hide cook and prep time
  reload                         repeat the last request
  show                           print the current view
  help | quit";

fn arg<'a>(rest: Option<&'a str>, usage: &str) -> Result<&'a str> {
    rest.map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Validation(format!("Usage: {usage}")))
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, Some(rest)),
        None => (line, None),
    };

    let command = match word.to_lowercase().as_str() {
        "first" => ShellCommand::Navigate(PageNav::First),
        "prev" | "previous" => ShellCommand::Navigate(PageNav::Previous),
        "next" => ShellCommand::Navigate(PageNav::Next),
        "last" => ShellCommand::Navigate(PageNav::Last),
        "page" => {
            let n = arg(rest, "page N")?;
            let page = n
                .parse::<u32>()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| Error::Validation(format!("Invalid page: {n}")))?;
            ShellCommand::Page(page)
        }
        "limit" => ShellCommand::Limit(arg(rest, "limit N")?.parse()?),
        "set" => {
            let args = arg(rest, "set FIELD VALUE")?;
            let (field, value) = args
                .split_once(char::is_whitespace)
                .ok_or_else(|| Error::Validation("Usage: set FIELD VALUE".to_string()))?;
            ShellCommand::Set(field.parse()?, value.trim().to_string())
        }
        "unset" => ShellCommand::Unset(arg(rest, "unset FIELD")?.parse()?),
        "filters" => ShellCommand::Filters,
        "search" => ShellCommand::Search,
        "clear" => ShellCommand::Clear,
        "select" => {
            let id = arg(rest, "select ID")?;
            ShellCommand::Select(
                id.parse()
                    .map_err(|_| Error::Validation(format!("Invalid recipe id: {id}")))?,
            )
        }
        "deselect" => ShellCommand::Deselect,
        "toggle" | "expand" => ShellCommand::Toggle,
        "reload" | "retry" => ShellCommand::Reload,
        "show" | "ls" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => {
            return Err(Error::Validation(format!(
                "Unknown command: {other} (type 'help')"
            )))
        }
    };

    Ok(Some(command))
}

/// Apply one command. Returns `false` when the shell should stop.
pub async fn execute<S: RecipeSource>(
    browser: &mut RecipeBrowser<S>,
    command: ShellCommand,
    json: bool,
) -> Result<bool> {
    match command {
        ShellCommand::Navigate(nav) => {
            if browser.navigate(nav).await.is_none() {
                println!("(no page in that direction)");
                return Ok(true);
            }
        }
        ShellCommand::Page(page) => {
            browser.load_page(page).await;
        }
        ShellCommand::Limit(limit) => {
            browser.set_limit(limit).await;
        }
        ShellCommand::Set(field, value) => {
            browser.set_filter(field, value);
            return Ok(true);
        }
        ShellCommand::Unset(field) => {
            browser.set_filter(field, "");
            return Ok(true);
        }
        ShellCommand::Filters => {
            let filters = browser.retrieval().filters();
            for field in FilterField::ALL {
                let value = filters.get(field);
                if value.is_empty() {
                    println!("  {:<11} ({})", field.wire_name(), field.hint());
                } else {
                    println!("  {:<11} {}", field.wire_name(), value);
                }
            }
            return Ok(true);
        }
        ShellCommand::Search => {
            browser.search().await;
        }
        ShellCommand::Clear => {
            browser.clear_filters().await;
        }
        ShellCommand::Select(id) => {
            browser.select(id)?;
        }
        ShellCommand::Deselect => browser.deselect(),
        ShellCommand::Toggle => {
            if !browser.toggle_expanded() {
                println!("(nothing selected)");
                return Ok(true);
            }
        }
        ShellCommand::Reload => {
            if browser.reload().await.is_none() {
                println!("(nothing to reload)");
                return Ok(true);
            }
        }
        ShellCommand::Show => {}
        ShellCommand::Help => {
            println!("{HELP}");
            return Ok(true);
        }
        ShellCommand::Quit => return Ok(false),
    }

    emit(&browser.snapshot(), json)?;
    Ok(true)
}

/// Read commands from stdin until EOF or `quit`, starting from page 1.
pub async fn run<S: RecipeSource>(browser: &mut RecipeBrowser<S>, json: bool) -> Result<()> {
    info!("Starting interactive browser");

    browser.load_page(1).await;
    emit(&browser.snapshot(), json)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e.log_safe());
                continue;
            }
        };

        match execute(browser, command, json).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("{}", e.log_safe()),
        }
    }

    Ok(())
}
