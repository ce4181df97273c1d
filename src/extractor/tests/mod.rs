use std::fs;
use std::sync::Arc;

use reqwest::StatusCode;
use url::Url;

use crate::extractor::{ExtractError, TitleService, extract_season_episodes, extract_title};
use crate::fetcher::{FetchError, MockPageSource, UpstreamUrls};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{}", name))
        .expect("Failed to read test fixture")
}

fn upstream() -> UpstreamUrls {
    UpstreamUrls::new(Url::parse("https://upstream.test").unwrap())
}

fn expect_page(source: &mut MockPageSource, url: Url, body: String) {
    source
        .expect_fetch_page()
        .withf(move |requested| requested.as_str() == url.as_str())
        .times(1)
        .returning(move |_| Ok(body.clone()));
}

#[test]
fn test_extract_movie_page() {
    let record = extract_title("tt1375666", &fixture("title.html")).unwrap();

    assert_eq!(record.id, "tt1375666");
    assert_eq!(record.review_api_path, "/reviews/tt1375666");
    assert_eq!(record.imdb, "https://www.imdb.com/title/tt1375666");
    assert_eq!(record.content_type, "Movie");
    assert!(!record.is_series());

    assert_eq!(record.title, "Inception");
    assert_eq!(record.original_title, "Inception");
    assert!(record.plot.starts_with("A thief who steals corporate secrets"));
    assert_eq!(record.rating.count, 2_612_345);
    assert_eq!(record.rating.star, 8.8);
    assert_eq!(record.content_rating, "PG-13");
    assert_eq!(record.genre, vec!["Action", "Adventure", "Sci-Fi"]);
    assert_eq!(record.directors, vec!["Christopher Nolan"]);
    assert_eq!(record.actors.len(), 3);
    assert_eq!(record.images.len(), 2);

    assert_eq!(record.award.summary, "Won 4 Oscars 159 wins & 220 nominations total");
    assert_eq!(record.award.wins, 159);
    assert_eq!(record.award.nominations, 220);

    assert_eq!(record.release_detailed.date, "2010-07-16");
    assert_eq!(record.release_detailed.release_location.country, "United States");
    assert_eq!(record.release_detailed.release_location.cca2, "US");
    assert_eq!(record.release_detailed.origin_locations.len(), 2);
    assert_eq!(record.year, Some(2010));

    let languages: Vec<_> = record.spoken_languages.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(languages, vec!["en", "ja", "fr"]);
    assert_eq!(record.filming_locations, vec!["Tangier, Morocco"]);
    assert_eq!(record.runtime, "2h 28m");
    assert_eq!(record.runtime_seconds, 8880);

    let credits: Vec<_> = record.top_credits.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(credits, vec!["Director", "Writer", "Stars"]);
    assert_eq!(record.top_credits[2].value.len(), 3);
}

#[test]
fn test_movie_record_has_no_season_keys() {
    let record = extract_title("tt1375666", &fixture("title.html")).unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert!(json.get("seasons").is_none());
    assert!(json.get("all_seasons").is_none());
    assert_eq!(json["contentType"], "Movie");
    assert_eq!(json["review_api_path"], "/reviews/tt1375666");
    assert_eq!(json["releaseDetailed"]["releaseLocation"]["cca2"], "US");
    assert_eq!(json["top_credits"][0]["name"], "Director");
}

#[test]
fn test_extraction_is_deterministic() {
    let raw = fixture("title.html");
    let first = extract_title("tt1375666", &raw).unwrap();
    let second = extract_title("tt1375666", &raw).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_oversized_runtime_does_not_fail_extraction() {
    let raw = r#"<html><head><script type="application/ld+json">{"@type":"Movie"}</script></head><body>
        <li data-testid="title-techspec_runtime"><span>Runtime</span><div>9999999999999999 hours</div></li>
        </body></html>"#;
    let record = extract_title("tt1", raw).unwrap();

    assert_eq!(record.runtime, "");
    assert_eq!(record.runtime_seconds, 0);
    assert_eq!(serde_json::to_value(&record).unwrap()["runtimeSeconds"], 0);
}

#[test]
fn test_malformed_region_does_not_affect_others() {
    let record = extract_title("tt0903747", &fixture("series.html")).unwrap();

    assert!(record.top_credits.is_empty());
    assert_eq!(record.title, "Breaking Bad");
    assert_eq!(record.original_title, "");
    assert!(record.plot.ends_with("secure his family's future."));
    assert_eq!(record.release_detailed.year, 2008);
    assert_eq!(record.year, Some(2008));
    assert_eq!(record.runtime, "45m");
    assert_eq!(record.spoken_languages.len(), 2);
    assert!(record.images.is_empty());
}

#[test]
fn test_missing_structured_data_fails() {
    let result = extract_title("tt0000000", &fixture("no_schema.html"));
    assert!(matches!(result, Err(ExtractError::StructuredDataMissing)));
}

#[test]
fn test_empty_page_fails() {
    assert!(matches!(
        extract_title("tt0000000", ""),
        Err(ExtractError::MalformedDocument(_))
    ));
}

#[test]
fn test_season_fragment() {
    let result = extract_season_episodes("tt0903747", "1", &fixture("episodes.html"));

    assert_eq!(result.episodes.len(), 2);
    assert_eq!(result.episodes[0].id, "tt0959621");
    assert_eq!(result.episodes[0].title, "Pilot");
    assert_eq!(result.episodes[0].air_date, "20 Jan. 2008");
    assert_eq!(result.episodes[0].rating.count, 39128);
    assert_eq!(result.episodes[1].title, "Cat's in the Bag...");
    assert_eq!(result.episodes[1].episode, 2);
    assert_eq!(result.all_seasons.len(), 5);
    assert_eq!(result.all_seasons[4].api_path, "/title/tt0903747/season/5");
}

#[tokio::test]
async fn test_service_movie_fetches_title_page_only() {
    let urls = upstream();
    let mut source = MockPageSource::new();
    expect_page(&mut source, urls.title("tt1375666"), fixture("title.html"));

    let service = TitleService::new(Arc::new(source), urls);
    let record = service.title("tt1375666").await.unwrap();

    assert_eq!(record.title, "Inception");
    assert!(record.seasons.is_none());
    assert!(record.all_seasons.is_none());
}

#[tokio::test]
async fn test_service_series_attaches_default_season() {
    let urls = upstream();
    let mut source = MockPageSource::new();
    expect_page(&mut source, urls.title("tt0903747"), fixture("series.html"));
    expect_page(
        &mut source,
        urls.episodes("tt0903747", None),
        fixture("episodes.html"),
    );

    let service = TitleService::new(Arc::new(source), urls);
    let record = service.title("tt0903747").await.unwrap();

    let episodes = record.seasons.as_ref().unwrap();
    assert_eq!(episodes.len(), 2);
    assert!(episodes.iter().all(|e| e.season == 1));
    assert_eq!(record.all_seasons.as_ref().unwrap().len(), 5);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["seasons"][0]["title"], "Pilot");
    assert!(json.get("episodes").is_none());
    assert_eq!(json["all_seasons"][1]["api_path"], "/title/tt0903747/season/2");
}

#[tokio::test]
async fn test_service_series_fails_when_seasons_unavailable() {
    let urls = upstream();
    let mut source = MockPageSource::new();
    expect_page(&mut source, urls.title("tt0903747"), fixture("series.html"));
    let episodes_url = urls.episodes("tt0903747", None);
    source
        .expect_fetch_page()
        .withf(move |requested| requested.as_str() == episodes_url.as_str())
        .times(1)
        .returning(|_| Err(FetchError::http(StatusCode::SERVICE_UNAVAILABLE)));

    let service = TitleService::new(Arc::new(source), urls);
    let result = service.title("tt0903747").await;

    assert!(matches!(result, Err(ExtractError::SeasonData(_))));
}

#[tokio::test]
async fn test_service_title_fetch_failure() {
    let mut source = MockPageSource::new();
    source
        .expect_fetch_page()
        .times(1)
        .returning(|_| Err(FetchError::RequestTimeout));

    let service = TitleService::new(Arc::new(source), upstream());
    let result = service.title("tt1375666").await;

    assert!(matches!(
        result,
        Err(ExtractError::Fetch(FetchError::RequestTimeout))
    ));
}

#[tokio::test]
async fn test_service_season_requests_pinned_season() {
    let urls = upstream();
    let mut source = MockPageSource::new();
    expect_page(
        &mut source,
        urls.episodes("tt0903747", Some("3")),
        fixture("episodes.html"),
    );

    let service = TitleService::new(Arc::new(source), urls);
    let result = service.season("tt0903747", "3").await.unwrap();

    assert!(result.episodes.iter().all(|e| e.season == 3));
    assert_eq!(result.all_seasons.len(), 5);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use proptest::prelude::*;

    use crate::extractor::{extract_default_season, extract_title};

    proptest! {
        #[test]
        fn extract_title_never_panics(raw in ".*") {
            let _ = extract_title("tt0000001", &raw);
        }

        #[test]
        fn extract_title_never_panics_on_markup(
            body in "(<[a-z]{1,3}( data-testid=\"[a-z_-]{1,30}\")?>|</[a-z]{1,3}>|[a-z0-9 ,()]{0,12}|[0-9]{1,25} (hours?|minutes?|min)){0,40}"
        ) {
            let raw = format!(
                r#"<html><head><script type="application/ld+json">{{"@type":"Movie"}}</script></head><body>{}</body></html>"#,
                body
            );
            prop_assert!(extract_title("tt0000001", &raw).is_ok());
        }

        #[test]
        fn runtime_never_panics(hours in "[0-9]{1,25}", minutes in "[0-9]{1,25}") {
            let raw = format!(
                r#"<html><head><script type="application/ld+json">{{"@type":"Movie"}}</script></head><body><li data-testid="title-techspec_runtime"><span>Runtime</span><div>{} hours {} minutes</div></li></body></html>"#,
                hours, minutes
            );
            prop_assert!(extract_title("tt0000001", &raw).is_ok());
        }

        #[test]
        fn season_fragment_never_panics(raw in ".*", season in "[0-9a-z]{0,3}") {
            let _ = extract_default_season("tt0000001", &raw);
            let _ = crate::extractor::extract_season_episodes("tt0000001", &season, &raw);
        }
    }
}
