/*!
 * # transrank - compare, rank and rate machine translations
 *
 * A Rust library and command-line client that asks a translation service for
 * several candidate translations of the same text, lets the user reorder and
 * rate them, and submits the resulting ranking.
 *
 * ## Features
 *
 * - Fetch candidate translations from several models for one text
 * - Reorder candidates and rate them from 1 to 10
 * - Submit ranked and rated candidates in one request
 * - Drop stale responses when comparisons overlap, and cancel in-flight requests
 * - Single-model translation with per-language usage counts
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `comparison`: the ranking workflow:
 *   - `comparison::candidate`: candidates and immutable comparison snapshots
 *   - `comparison::reorder`: single-step moves
 *   - `comparison::rating`: rating parsing and clamping
 *   - `comparison::store`: owner of the current snapshot
 *   - `comparison::submission`: ranked submission records
 *   - `comparison::orchestrator`: request lifecycle
 * - `service`: wire types and backends (HTTP and mock)
 * - `translation_service`: single-model translation
 * - `app_config`: Configuration management
 * - `app_controller`: Interactive session controller
 * - `language_utils`: Target language catalog and tag validation
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod comparison;
pub mod errors;
pub mod language_utils;
pub mod service;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use comparison::{ComparisonOrchestrator, ComparisonState, Rating, RequestStatus, TranslationCandidate};
pub use errors::{AppError, ComparisonError, ServiceError};
pub use service::TranslationBackend;
pub use translation_service::TranslationService;
