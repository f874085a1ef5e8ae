//! HTML front end: scrape a saved API-docs page.
//!
//! The pages carry their response schema as a leveled parameter table (the
//! element-ui tree table, nesting depth encoded in a row class). Scraping is
//! best effort: the first table that yields at least one well-formed row
//! wins, and a page with no such table produces an empty model rather than
//! an error.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::model::{ParsedModel, Row};
use crate::parse::DEFAULT_ROOT_NAME;
use crate::{build, names};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static LI: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());

/// Nesting depth marker on tree-table rows, e.g. `el-table__row--level-2`.
static LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"el-table__row--level-(\d+)").unwrap());

/// How many trailing URL path segments feed the root class name.
const NAME_SEGMENTS: usize = 3;

pub fn parse(input: &str, root_name: Option<&str>) -> ParsedModel {
    let document = Html::parse_document(input);
    let root = root_name
        .map(str::to_string)
        .or_else(|| root_name_from_page(&document))
        .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string());

    let rows = document
        .select(&TABLE)
        .map(table_rows)
        .find(|rows| !rows.is_empty())
        .unwrap_or_default();
    tracing::debug!(root = %root, rows = rows.len(), "scraped parameter table");
    build::build(rows, &root)
}

fn table_rows(table: ElementRef<'_>) -> Vec<Row> {
    let mut rows = Vec::new();
    for tr in table.select(&TR) {
        if tr
            .value()
            .attr("style")
            .is_some_and(|style| style.replace(' ', "").contains("display:none"))
        {
            continue;
        }
        let level = tr
            .value()
            .attr("class")
            .and_then(|classes| LEVEL.captures(classes))
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(0);

        let cells: Vec<String> = tr.select(&TD).map(cell_text).collect();
        let [name, ty, description, ..] = cells.as_slice() else {
            continue;
        };
        if name.is_empty() || ty.is_empty() {
            continue;
        }
        rows.push(Row {
            name: name.clone(),
            ty: ty.clone(),
            description: description.clone(),
            level,
        });
    }
    rows
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let text: String = cell.text().collect();
    // the docs pages append a copy-button caption to the name cell
    text.trim().trim_end_matches("复制").trim().to_string()
}

/// Derive the root class name from the endpoint URL listed on the page
/// (the first `<li>` whose text parses as an absolute URL).
fn root_name_from_page(document: &Html) -> Option<String> {
    for li in document.select(&LI) {
        let text: String = li.text().collect();
        let Some(candidate) = text.split_whitespace().find(|t| t.contains("://")) else {
            continue;
        };
        let Ok(endpoint) = Url::parse(candidate) else {
            continue;
        };
        let segments: Vec<&str> = endpoint
            .path_segments()
            .map(|s| s.collect::<Vec<_>>())
            .unwrap_or_default();
        if segments.is_empty() {
            continue;
        }
        let tail = &segments[segments.len().saturating_sub(NAME_SEGMENTS)..];
        return Some(names::class_name_from_path(tail));
    }
    None
}

// ------------------------------- Tests ------------------------------------ //
