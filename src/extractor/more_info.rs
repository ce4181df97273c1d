//! Fields that only exist in the human-oriented page markup.
//!
//! Every field is looked up on its own and falls back to its sentinel when
//! the region is missing or has an unexpected shape, so one broken section
//! never costs the others.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::document::{Document, Node};
use crate::extractor::defaults::{COUNT_DEFAULT, DATE_PART_UNKNOWN, RUNTIME_UNKNOWN, TEXT_DEFAULT};
use crate::extractor::model::{
    Award, Location, MarkupDetails, ReleaseDetailed, SpokenLanguage, TopCredit,
};

/// A markup region: tag name plus a value carried by one of its attributes.
#[derive(Debug, Clone, Copy)]
struct Region {
    tag: &'static str,
    marker: &'static str,
}

impl Region {
    const fn new(tag: &'static str, marker: &'static str) -> Self {
        Self { tag, marker }
    }

    fn find<'d>(&self, doc: &'d Document) -> Option<Node<'d>> {
        let node = doc.find_node(self.tag, self.marker);
        if node.is_none() {
            debug!(region = self.marker, "markup region not found, using default");
        }
        node
    }
}

const HERO_TITLE: Region = Region::new("h1", "hero__pageTitle");
const PRODUCTION_STATUS: Region = Region::new("li", "title-details-productionstatus");
const PHOTOS: Region = Region::new("section", "Photos");
const AWARDS: Region = Region::new("li", "award_information");
const RELEASE_DATE: Region = Region::new("li", "title-details-releasedate");
const ORIGIN: Region = Region::new("li", "title-details-origin");
const LANGUAGES: Region = Region::new("li", "title-details-languages");
const FILMING_LOCATIONS: Region = Region::new("li", "title-details-filminglocations");
const RUNTIME: Region = Region::new("li", "title-techspec_runtime");
const TOP_CREDITS: Region = Region::new("div", "title-pc-expanded-section");

const PRIMARY_TEXT_CLASS: &str = "hero__primary-text";
const ORIGINAL_TITLE_PREFIX: &str = "Original title: ";

// Relative links on the page are resolved against this origin to read their
// query strings.
static LINK_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://www.imdb.com/").unwrap());

static WINS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\s+wins?\b").unwrap());
static NOMINATIONS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\s+nominations?\b").unwrap());

static HOURS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:hours?|hrs?|h)\b").unwrap());
static MINUTES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:minutes?|mins?|m)\b").unwrap());

/// "July 16, 2010 (United States)" -> date part and location part.
static RELEASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date>[^(]*?)\s*(?:\((?P<country>[^)]*)\))?\s*$").unwrap()
});

pub fn extract_details(doc: &Document) -> MarkupDetails {
    let (title, original_title) = titles(doc);
    let (runtime, runtime_seconds) = runtime(doc);

    MarkupDetails {
        title,
        original_title,
        production_status: production_status(doc),
        images: images(doc),
        award: award(doc),
        release_detailed: release_detailed(doc),
        spoken_languages: spoken_languages(doc),
        filming_locations: filming_locations(doc),
        runtime,
        runtime_seconds,
        top_credits: top_credits(doc),
    }
}

/// Primary and original title from the hero heading.
fn titles(doc: &Document) -> (String, String) {
    let Some(heading) = HERO_TITLE.find(doc) else {
        return (TEXT_DEFAULT.to_string(), TEXT_DEFAULT.to_string());
    };

    let title = heading
        .find_class(PRIMARY_TEXT_CLASS)
        .map(|primary| primary.text())
        .unwrap_or_else(|| heading.text());

    let original_title = heading
        .next_sibling()
        .map(|sibling| {
            sibling
                .text()
                .replacen(ORIGINAL_TITLE_PREFIX, "", 1)
                .trim()
                .to_string()
        })
        .unwrap_or_default();

    (title, original_title)
}

/// Metadata list items are a label followed by a content container.
fn content(item: Node<'_>) -> Node<'_> {
    item.child(1).unwrap_or(item)
}

fn production_status(doc: &Document) -> String {
    PRODUCTION_STATUS
        .find(doc)
        .map(|item| content(item).text_normalized())
        .unwrap_or_else(|| TEXT_DEFAULT.to_string())
}

fn images(doc: &Document) -> Vec<String> {
    PHOTOS
        .find(doc)
        .map(|section| {
            section
                .filter("img")
                .filter_map(|img| img.attr("src"))
                .filter(|src| !src.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn award(doc: &Document) -> Award {
    let Some(item) = AWARDS.find(doc) else {
        return Award::default();
    };
    let summary = item.text_normalized();

    Award {
        wins: first_count(&WINS_REGEX, &summary),
        nominations: first_count(&NOMINATIONS_REGEX, &summary),
        summary,
    }
}

fn first_count(regex: &Regex, text: &str) -> u64 {
    regex
        .captures(text)
        .and_then(|caps| caps[1].replace(',', "").parse().ok())
        .unwrap_or(COUNT_DEFAULT)
}

fn release_detailed(doc: &Document) -> ReleaseDetailed {
    let origin_locations = origin_locations(doc);

    let Some(item) = RELEASE_DATE.find(doc) else {
        return ReleaseDetailed {
            origin_locations,
            ..ReleaseDetailed::default()
        };
    };

    let container = content(item);
    let text = container
        .find_first("a")
        .unwrap_or(container)
        .text_normalized();

    let (date_text, country) = RELEASE_REGEX
        .captures(&text)
        .map(|caps| {
            (
                caps.name("date").map_or("", |m| m.as_str()).to_string(),
                caps.name("country").map_or("", |m| m.as_str()).trim().to_string(),
            )
        })
        .unwrap_or_else(|| (text.clone(), String::new()));

    let (date, day, month, year) = parse_release_date(&date_text);

    // Only origin links carry a country code; reuse it when the names match.
    let cca2 = origin_locations
        .iter()
        .find(|origin| origin.country == country)
        .map(|origin| origin.cca2.clone())
        .unwrap_or_default();

    ReleaseDetailed {
        date,
        day,
        month,
        year,
        release_location: Location { country, cca2 },
        origin_locations,
    }
}

/// Accepts "July 16, 2010", "July 2010" and "2010". Returns the ISO date
/// (empty unless fully known) and day, month, year with -1 for unknown parts.
fn parse_release_date(text: &str) -> (String, i32, i32, i32) {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%B %d, %Y") {
        return (
            date.format("%Y-%m-%d").to_string(),
            date.day() as i32,
            date.month() as i32,
            date.year(),
        );
    }

    if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {}", text), "%d %B %Y") {
        return (
            String::new(),
            DATE_PART_UNKNOWN,
            date.month() as i32,
            date.year(),
        );
    }

    let year = text
        .parse::<i32>()
        .ok()
        .filter(|year| *year > 0)
        .unwrap_or(DATE_PART_UNKNOWN);
    (String::new(), DATE_PART_UNKNOWN, DATE_PART_UNKNOWN, year)
}

fn origin_locations(doc: &Document) -> Vec<Location> {
    link_items(ORIGIN, doc, "country_of_origin")
        .into_iter()
        .map(|(country, code)| Location {
            country,
            cca2: code.to_uppercase(),
        })
        .collect()
}

fn spoken_languages(doc: &Document) -> Vec<SpokenLanguage> {
    link_items(LANGUAGES, doc, "primary_language")
        .into_iter()
        .map(|(language, id)| SpokenLanguage { language, id })
        .collect()
}

fn filming_locations(doc: &Document) -> Vec<String> {
    link_items(FILMING_LOCATIONS, doc, "locations")
        .into_iter()
        .map(|(location, _)| location)
        .collect()
}

/// Anchor texts of a metadata list item, each paired with one query
/// parameter of its link (empty when absent).
fn link_items(region: Region, doc: &Document, param: &str) -> Vec<(String, String)> {
    let Some(item) = region.find(doc) else {
        return Vec::new();
    };

    content(item)
        .filter("a")
        .filter_map(|anchor| {
            let text = anchor.text_normalized();
            if text.is_empty() {
                return None;
            }
            let value = anchor
                .attr("href")
                .and_then(|href| query_param(href, param))
                .unwrap_or_default();
            Some((text, value))
        })
        .collect()
}

fn query_param(href: &str, key: &str) -> Option<String> {
    let url = LINK_BASE.join(href).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Display runtime ("2h 28m") and total seconds.
fn runtime(doc: &Document) -> (String, u64) {
    let seconds = RUNTIME
        .find(doc)
        .map(|item| runtime_seconds(&content(item).text_normalized()))
        .unwrap_or(RUNTIME_UNKNOWN);

    (format_runtime(seconds), seconds)
}

/// Total seconds, or `RUNTIME_UNKNOWN` when a number does not fit.
fn runtime_seconds(text: &str) -> u64 {
    let unit = |regex: &Regex, scale: u64| -> Option<u64> {
        match regex.captures(text) {
            Some(caps) => caps[1].parse::<u64>().ok()?.checked_mul(scale),
            None => Some(0),
        }
    };

    unit(&HOURS_REGEX, 3600)
        .zip(unit(&MINUTES_REGEX, 60))
        .and_then(|(hours, minutes)| hours.checked_add(minutes))
        .unwrap_or(RUNTIME_UNKNOWN)
}

fn format_runtime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    match (hours, minutes) {
        (0, 0) => TEXT_DEFAULT.to_string(),
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Principal credits. The block has no semantic markers below its
/// container, so any deviation from the expected nesting yields nothing.
fn top_credits(doc: &Document) -> Vec<TopCredit> {
    let credits = read_top_credits(doc);
    if credits.is_none() {
        debug!("top credits block missing or malformed");
    }
    credits.unwrap_or_default()
}

fn read_top_credits(doc: &Document) -> Option<Vec<TopCredit>> {
    let list = TOP_CREDITS.find(doc)?.first_child()?.first_child()?;

    list.children()
        .map(|entry| {
            let name = entry.first_child()?.text();
            let value = entry
                .child(1)?
                .first_child()?
                .children()
                .map(|credit| credit.text())
                .collect();
            Some(TopCredit { name, value })
        })
        .collect()
}
