//! Shared constants for end-to-end tests
//!
//! When the fixture catalog changes, update only this file and fixtures.rs.
#![allow(dead_code)]

// ============================================================================
// Artists
// ============================================================================

/// "The Test Band", rock
pub const ARTIST_1_ID: &str = "artist-1";
/// "Jazz Ensemble", jazz
pub const ARTIST_2_ID: &str = "artist-2";
/// "Heartstrings", pop
pub const ARTIST_3_ID: &str = "artist-3";

pub const ARTIST_1_NAME: &str = "The Test Band";
pub const ARTIST_2_NAME: &str = "Jazz Ensemble";
pub const ARTIST_3_NAME: &str = "Heartstrings";

// ============================================================================
// Tracks
// ============================================================================

pub const TRACK_1_ID: &str = "track-1";
pub const TRACK_2_ID: &str = "track-2";
pub const TRACK_3_ID: &str = "track-3";
pub const TRACK_4_ID: &str = "track-4";
pub const TRACK_5_ID: &str = "track-5";
pub const TRACK_6_ID: &str = "track-6";
pub const TRACK_7_ID: &str = "track-7";
pub const TRACK_8_ID: &str = "track-8";

pub const TRACK_4_TITLE: &str = "Blue Smoke";
pub const TRACK_6_TITLE: &str = "Love";
pub const TRACK_7_TITLE: &str = "Lovely";
pub const TRACK_8_TITLE: &str = "Lost";

// ============================================================================
// Users
// ============================================================================

/// Likes tracks 1, 2, 3
pub const USER_1_ID: &str = "user-1";
/// Likes tracks 2, 3, 4
pub const USER_2_ID: &str = "user-2";
/// Likes tracks 6, 7
pub const USER_3_ID: &str = "user-3";
/// No likes, no plays
pub const USER_4_ID: &str = "user-4";

pub const UNKNOWN_USER_ID: &str = "nobody";
