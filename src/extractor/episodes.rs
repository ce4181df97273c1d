use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::document::{Document, Node};
use crate::extractor::defaults::{COUNT_DEFAULT, INDEX_UNKNOWN, RATING_DEFAULT};
use crate::extractor::model::{EpisodeRecord, Rating, SeasonFragmentResult, SeasonRef};

const EPISODE_CLASS: &str = "list_item";
const AIRDATE_CLASS: &str = "airdate";
const RATING_CLASS: &str = "ipl-rating-star__rating";
const VOTES_CLASS: &str = "ipl-rating-star__total-votes";
const SEASON_SELECTOR: (&str, &str) = ("select", "bySeason");

/// Season listed first when the selector marks none as selected.
pub const DEFAULT_SEASON: &str = "1";

static TITLE_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"tt\d+").unwrap());

/// Episodes of `season_id` plus every season the selector offers.
///
/// Never fails: an empty fragment or one without episodes or selector
/// yields empty collections.
#[instrument(skip(raw), fields(bytes = raw.len()))]
pub fn extract_season_episodes(id: &str, season_id: &str, raw: &str) -> SeasonFragmentResult {
    let Ok(doc) = Document::parse(raw) else {
        debug!("empty season fragment");
        return SeasonFragmentResult::default();
    };
    read_fragment(&doc, id, season_id)
}

/// Like [`extract_season_episodes`] for a listing fetched without a season
/// parameter; the season is whichever one the selector marks as selected.
/// Returns the resolved season id alongside the result.
#[instrument(skip(raw), fields(bytes = raw.len()))]
pub fn extract_default_season(id: &str, raw: &str) -> (String, SeasonFragmentResult) {
    let Ok(doc) = Document::parse(raw) else {
        debug!("empty season fragment");
        return (DEFAULT_SEASON.to_string(), SeasonFragmentResult::default());
    };
    let season_id = selected_season(&doc).unwrap_or_else(|| DEFAULT_SEASON.to_string());
    let result = read_fragment(&doc, id, &season_id);
    (season_id, result)
}

fn read_fragment(doc: &Document, id: &str, season_id: &str) -> SeasonFragmentResult {
    let season = season_id.trim().parse().unwrap_or(INDEX_UNKNOWN);
    let episodes = parse_episodes(doc, season);
    let all_seasons = parse_seasons(doc, id);
    debug!(
        episodes = episodes.len(),
        seasons = all_seasons.len(),
        "parsed season fragment"
    );

    SeasonFragmentResult {
        episodes,
        all_seasons,
    }
}

fn parse_episodes(doc: &Document, season: i32) -> Vec<EpisodeRecord> {
    doc.root()
        .descendants()
        .filter(|node| node.has_class(EPISODE_CLASS))
        .map(|item| parse_episode(item, season))
        .collect()
}

fn parse_episode(item: Node<'_>, season: i32) -> EpisodeRecord {
    let episode = item
        .find_node("meta", "episodeNumber")
        .and_then(|meta| meta.attr("content"))
        .and_then(|number| number.trim().parse().ok())
        .unwrap_or(INDEX_UNKNOWN);

    let title = item
        .find_node("a", "name")
        .or_else(|| item.find_first("strong"))
        .map(|node| node.text_normalized())
        .unwrap_or_default();

    EpisodeRecord {
        id: episode_id(item).unwrap_or_default(),
        season,
        episode,
        title,
        image: item
            .find_first("img")
            .and_then(|img| img.attr("src"))
            .unwrap_or_default()
            .to_string(),
        plot: item
            .find_node("div", "description")
            .map(|node| node.text_normalized())
            .unwrap_or_default(),
        air_date: item
            .find_class(AIRDATE_CLASS)
            .map(|node| node.text_normalized())
            .unwrap_or_default(),
        rating: episode_rating(item),
    }
}

fn episode_id(item: Node<'_>) -> Option<String> {
    if let Some(id) = item
        .descendants()
        .find_map(|node| node.attr("data-const"))
        .filter(|id| !id.is_empty())
    {
        return Some(id.to_string());
    }

    item.filter("a")
        .filter_map(|anchor| anchor.attr("href"))
        .find_map(|href| TITLE_ID_REGEX.find(href))
        .map(|m| m.as_str().to_string())
}

fn episode_rating(item: Node<'_>) -> Rating {
    let star = item
        .find_class(RATING_CLASS)
        .and_then(|node| node.text().parse().ok())
        .unwrap_or(RATING_DEFAULT);

    // "(39,128)"
    let count = item
        .find_class(VOTES_CLASS)
        .map(|node| {
            node.text()
                .chars()
                .filter(char::is_ascii_digit)
                .collect::<String>()
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(COUNT_DEFAULT);

    Rating { count, star }
}

fn season_options<'d>(doc: &'d Document) -> Vec<Node<'d>> {
    let (tag, marker) = SEASON_SELECTOR;
    doc.find_node(tag, marker)
        .map(|select| select.filter("option").collect())
        .unwrap_or_default()
}

fn parse_seasons(doc: &Document, id: &str) -> Vec<SeasonRef> {
    season_options(doc)
        .into_iter()
        .filter_map(|option| {
            let value = option.attr("value")?.trim();
            if value.is_empty() {
                return None;
            }
            let name = option.text_normalized();
            Some(SeasonRef {
                id: value.to_string(),
                name: if name.is_empty() {
                    value.to_string()
                } else {
                    name
                },
                api_path: format!("/title/{}/season/{}", id, value),
            })
        })
        .collect()
}

fn selected_season(doc: &Document) -> Option<String> {
    season_options(doc)
        .into_iter()
        .find(|option| option.attr("selected").is_some())
        .and_then(|option| option.attr("value"))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"
      <div id="episodes_content">
        <div class="seasonAndYearNav">
          <select id="bySeason" tconst="tt0903747" class="current">
            <option value="1">1</option>
            <option selected="selected" value="2">2</option>
            <option value="3">3</option>
          </select>
        </div>
        <h3 id="episode_top" itemprop="name">Season&nbsp;2</h3>
        <div class="list detail eplist">
          <div class="list_item odd">
            <div class="image"><a href="/title/tt1232244/?ref_=ttep_ep1" title="Seven Thirty-Seven" itemprop="url">
              <div data-const="tt1232244" class="hover-over-image zero-z-index">
                <img width="224" height="126" class="zero-z-index" alt="Seven Thirty-Seven" src="https://m.media-amazon.com/images/M/737.jpg">
                <div>S2, Ep1</div>
              </div></a></div>
            <div class="info" itemprop="episodes" itemscope itemtype="http://schema.org/TVEpisode">
              <meta itemprop="episodeNumber" content="1"/>
              <div class="airdate">
                8 Mar. 2009
              </div>
              <strong><a href="/title/tt1232244/?ref_=ttep_ep1" title="Seven Thirty-Seven" itemprop="name">Seven Thirty-Seven</a></strong>
              <div class="ipl-rating-widget"><div class="ipl-rating-star small">
                <span class="ipl-rating-star__star"></span>
                <span class="ipl-rating-star__rating">8.6</span>
                <span class="ipl-rating-star__total-votes">(31,032)</span>
              </div></div>
              <div class="item_description" itemprop="description">
                Walt and Jesse realize how dire their situation is.
              </div>
            </div>
          </div>
          <div class="list_item even">
            <div class="info">
              <meta itemprop="episodeNumber" content="2"/>
              <strong><a href="/title/tt1232249/?ref_=ttep_ep2" itemprop="name">Grilled</a></strong>
            </div>
          </div>
        </div>
      </div>"#;

    #[test]
    fn test_episodes_in_document_order() {
        let result = extract_season_episodes("tt0903747", "2", FRAGMENT);
        assert_eq!(result.episodes.len(), 2);

        let first = &result.episodes[0];
        assert_eq!(first.id, "tt1232244");
        assert_eq!(first.season, 2);
        assert_eq!(first.episode, 1);
        assert_eq!(first.title, "Seven Thirty-Seven");
        assert_eq!(first.image, "https://m.media-amazon.com/images/M/737.jpg");
        assert_eq!(first.air_date, "8 Mar. 2009");
        assert_eq!(first.plot, "Walt and Jesse realize how dire their situation is.");
        assert_eq!(first.rating.star, 8.6);
        assert_eq!(first.rating.count, 31032);

        let second = &result.episodes[1];
        assert_eq!(second.id, "tt1232249");
        assert_eq!(second.episode, 2);
        assert_eq!(second.title, "Grilled");
        assert_eq!(second.rating, Rating::default());
        assert!(second.image.is_empty());
        assert!(second.air_date.is_empty());
    }

    #[test]
    fn test_all_seasons_independent_of_requested_season() {
        let result = extract_season_episodes("tt0903747", "3", FRAGMENT);
        let ids: Vec<_> = result.all_seasons.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(result.all_seasons[2].api_path, "/title/tt0903747/season/3");
        assert_eq!(result.all_seasons[0].name, "1");
    }

    #[test]
    fn test_non_numeric_season_id() {
        let result = extract_season_episodes("tt0903747", "unknown", FRAGMENT);
        assert!(result.episodes.iter().all(|e| e.season == INDEX_UNKNOWN));
    }

    #[test]
    fn test_default_season_uses_selected_option() {
        let (season_id, result) = extract_default_season("tt0903747", FRAGMENT);
        assert_eq!(season_id, "2");
        assert_eq!(result.episodes[0].season, 2);
    }

    #[test]
    fn test_default_season_without_selector() {
        let (season_id, result) = extract_default_season("tt0903747", "<div></div>");
        assert_eq!(season_id, DEFAULT_SEASON);
        assert!(result.episodes.is_empty());
        assert!(result.all_seasons.is_empty());
    }

    #[test]
    fn test_selector_without_episodes() {
        let fragment = r#"<select id="bySeason"><option value="1">1</option><option value="2">2</option></select><div class="list detail eplist"></div>"#;
        let result = extract_season_episodes("tt0903747", "9", fragment);
        assert!(result.episodes.is_empty());
        assert_eq!(result.all_seasons.len(), 2);
    }

    #[test]
    fn test_empty_fragment() {
        assert_eq!(
            extract_season_episodes("tt0903747", "1", ""),
            SeasonFragmentResult::default()
        );
        assert_eq!(
            extract_season_episodes("tt0903747", "1", "<html><body></body></html>"),
            SeasonFragmentResult::default()
        );
    }
}
