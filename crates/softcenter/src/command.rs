use anyhow::{anyhow, bail, Error};
use softcenter_core::view::navigation::{AppId, CatalogView};
use softcenter_core::view::PaneEvent;
use std::str::FromStr;

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pane(PaneEvent),
    History,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let view = match name {
            "back" => return Ok(Command::Pane(PaneEvent::Back)),
            "forward" => return Ok(Command::Pane(PaneEvent::Forward)),
            "history" => return Ok(Command::History),
            "quit" | "exit" => return Ok(Command::Quit),
            "home" => CatalogView::Lobby,
            "category" => CatalogView::Category {
                category: required(name, rest)?.to_string(),
            },
            "subcategory" => {
                let (category, subcategory) = split_path(required(name, rest)?)
                    .and_then(|(category, subcategory)| Some((category, subcategory?)))
                    .ok_or_else(|| anyhow!("usage: subcategory <category>/<name>"))?;
                CatalogView::Subcategory {
                    category: category.to_string(),
                    subcategory: subcategory.to_string(),
                }
            }
            "apps" => {
                let (category, subcategory) = split_path(required(name, rest)?)
                    .ok_or_else(|| anyhow!("usage: apps <category>[/<subcategory>]"))?;
                CatalogView::AppList {
                    category: category.to_string(),
                    subcategory: subcategory.map(str::to_string),
                }
            }
            "app" => {
                let args = required(name, rest)?;
                let app = match args.split_once(char::is_whitespace) {
                    Some((pkgname, appname)) => AppId::new(pkgname).with_appname(appname.trim()),
                    None => AppId::new(args),
                };
                CatalogView::AppDetails { app }
            }
            "search" => CatalogView::Search {
                query: required(name, rest)?.to_string(),
                category: None,
            },
            _ => bail!("unknown command: {}", name),
        };

        Ok(Command::Pane(PaneEvent::Open(view)))
    }
}

/// Splits `<category>[/<subcategory>]`, rejecting empty halves.
fn split_path(path: &str) -> Option<(&str, Option<&str>)> {
    match path.split_once('/') {
        Some((category, subcategory)) => {
            let (category, subcategory) = (category.trim(), subcategory.trim());
            if category.is_empty() || subcategory.is_empty() {
                None
            } else {
                Some((category, Some(subcategory)))
            }
        }
        None => Some((path, None)),
    }
}

fn required<'a>(name: &str, rest: &'a str) -> Result<&'a str, Error> {
    if rest.is_empty() {
        bail!("{} needs an argument", name);
    }
    Ok(rest)
}
