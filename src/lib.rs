// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod player;
pub mod playlist;
pub mod query;
pub mod recording;
pub mod session;
pub mod timefmt;
