pub mod compose;
pub mod defaults;
pub mod episodes;
pub mod errors;
pub mod model;
pub mod more_info;
pub mod schema;

#[cfg(test)]
mod tests;

pub use compose::{Identity, TitleService, compose, extract_title};
pub use episodes::{extract_default_season, extract_season_episodes};
pub use errors::ExtractError;
pub use model::{
    Award, EpisodeRecord, Location, MarkupDetails, Rating, ReleaseDetailed, SeasonFragmentResult,
    SeasonRef, SpokenLanguage, StructuredMetadata, TitleRecord, TopCredit,
};
pub use more_info::extract_details;
pub use schema::extract_structured;
