pub mod entity;
pub mod listing;

pub use entity::{handle_album, handle_song};
pub use listing::{handle_artist_albums, handle_artist_tracks, handle_label_albums, handle_search};
