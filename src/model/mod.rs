//! Domain records served by the REST backend and their form/display helpers.

mod player;
mod turf;

pub use player::{
    average_stats, empty_player_form, player_to_form, AverageStats, CoercionError, Performance,
    Player, PlayerPayload, PLAYER_FORM_FIELDS, PLAYER_SEARCH_FIELDS,
};
pub use turf::{
    directions_url, format_operating_hours, google_maps_url, osm_embed_url, Turf, TurfDetail,
    OSM_DEFAULT_DELTA, TURF_SEARCH_FIELDS,
};
