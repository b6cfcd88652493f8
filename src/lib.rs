//! Reset a Pinewood Derby race backend between sessions.
//!
//! `derby-reset` deletes every heat result, heat entry, heat, round, and car
//! from the event's Supabase project, and by default every car photo in the
//! storage bucket. Deletes are issued one at a time in foreign-key order:
//!
//! | Step | Request |
//! |------|---------|
//! | 1 | `PATCH race_state?id=eq.1` with `current_round_id` and `current_heat_id` set to null |
//! | 2 | `DELETE heat_results` |
//! | 3 | `DELETE heat_entries` |
//! | 4 | `DELETE heats` |
//! | 5 | `DELETE rounds` |
//! | 6 | `DELETE cars` |
//! | 7 | list `car-images`, then one bulk delete of everything listed (optional) |
//!
//! Steps 1 through 6 are fatal on failure. Step 7 only reports.
//!
//! # Modules
//!
//! - [`config`]: configuration from TOML and environment variables
//! - [`backend`]: Supabase REST and Storage client
//! - [`schema`]: the remote tables and their deletion order
//! - [`reset`]: confirmation prompt, reset plan, and the runner
//! - [`error`]: error types

pub mod backend;
pub mod config;
pub mod error;
pub mod reset;
pub mod schema;
