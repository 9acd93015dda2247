use std::str::FromStr;

use report_core::{
    catalog, AppViewModel, FieldId, Msg, ReportTypeId, SearchSlot, Stage, SECTORS,
};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    List,
    Toc,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list                  show the report catalog
  select <type|n>       choose a report type
  sector <value|n>      set the sector (sector overview)
  topic <text>          describe the market (market entry brief)
  search <text>         look up companies (deep dive, competitive analysis)
  pick <n>              take result n from the last search
  remove <slug>         drop a company from the comparison
  clear                 clear the selected company
  generate              generate the report
  toc                   show the table of contents
  goto <section|n>      jump to a section
  print                 export a printable HTML copy
  share                 show the share link
  new                   start a new report of the same type
  back                  return to the catalog
  help                  show this help
  quit                  exit";

/// Turns one line of input into a command. Lookups such as `pick 2` resolve
/// against the current view.
pub fn parse(line: &str, view: &AppViewModel) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" => Command::List,
        "toc" => Command::Toc,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "select" => Command::Msg(Msg::ReportTypeSelected(report_type_arg(rest)?)),
        "sector" => Command::Msg(Msg::SectorChanged(sector_arg(rest)?)),
        "topic" => Command::Msg(Msg::TopicChanged(rest.to_string())),
        "search" => Command::Msg(Msg::SearchInputChanged {
            slot: search_slot(view)?,
            query: rest.to_string(),
        }),
        "pick" => {
            let slot = search_slot(view)?;
            let search = match slot {
                SearchSlot::Single => &view.single_search,
                SearchSlot::Multi => &view.multi_search,
            };
            if search.pending {
                return Err(format!("Still searching for '{}'", search.query));
            }
            let results = &search.results;
            let entity = index_arg(rest, results.len())
                .map(|index| results[index].clone())
                .ok_or_else(|| format!("No search result numbered '{rest}'"))?;
            Command::Msg(Msg::EntityPicked { slot, entity })
        }
        "remove" => {
            if rest.is_empty() {
                return Err("Usage: remove <slug>".to_string());
            }
            Command::Msg(Msg::EntityRemoved {
                slug: rest.to_string(),
            })
        }
        "clear" => Command::Msg(Msg::EntityCleared),
        "generate" => Command::Msg(Msg::GenerateClicked),
        "goto" => Command::Msg(Msg::TocEntryClicked {
            section_id: section_arg(rest, view)?,
        }),
        "print" => Command::Msg(Msg::PrintClicked),
        "share" => Command::Msg(Msg::ShareClicked),
        "new" => Command::Msg(Msg::StartNewReportClicked),
        "back" => Command::Msg(Msg::BackToCatalogClicked),
        other => return Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
    };
    Ok(Some(command))
}

fn index_arg(arg: &str, len: usize) -> Option<usize> {
    let n: usize = arg.parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

fn report_type_arg(arg: &str) -> Result<ReportTypeId, String> {
    if let Some(index) = index_arg(arg, catalog().len()) {
        return Ok(catalog()[index].id);
    }
    ReportTypeId::from_str(arg).map_err(|err| err.to_string())
}

fn sector_arg(arg: &str) -> Result<String, String> {
    if arg.is_empty() {
        return Err("Usage: sector <value|n>".to_string());
    }
    if let Some(index) = index_arg(arg, SECTORS.len()) {
        return Ok(SECTORS[index].value.to_string());
    }
    let matched = SECTORS
        .iter()
        .find(|option| option.value == arg || option.label.eq_ignore_ascii_case(arg));
    // Unknown values go through so validation can name them.
    Ok(matched.map_or_else(|| arg.to_string(), |option| option.value.to_string()))
}

fn search_slot(view: &AppViewModel) -> Result<SearchSlot, String> {
    if view.stage != Stage::Configure {
        return Err("Searching is only available while configuring a report".to_string());
    }
    let report_type = view
        .report_type
        .ok_or_else(|| "Select a report type first".to_string())?;
    if report_type.field(FieldId::Companies).is_some() {
        Ok(SearchSlot::Multi)
    } else if report_type.field(FieldId::Company).is_some() {
        Ok(SearchSlot::Single)
    } else {
        Err(format!("{} does not take companies", report_type.name))
    }
}

fn section_arg(arg: &str, view: &AppViewModel) -> Result<String, String> {
    let Some(document) = view.document.as_ref() else {
        return Err("No report to navigate yet".to_string());
    };
    if let Some(index) = index_arg(arg, document.toc.len()) {
        return Ok(document.toc[index].id.clone());
    }
    if arg.is_empty() {
        return Err("Usage: goto <section|n>".to_string());
    }
    Ok(arg.to_string())
}
