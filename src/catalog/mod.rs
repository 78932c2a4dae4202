mod artist;
mod interaction;
mod track;
mod user;

pub use artist::Artist;
pub use interaction::{UserArtistInteraction, UserTrackInteraction};
pub use track::{Track, TRACK_FEATURES};
pub use user::User;
