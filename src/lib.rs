//! # pim-search
//!
//! Unified full-text search engine for a personal information manager.
//!
//! The application keeps its records (wiki pages, tasks, calendar events,
//! journal entries, operations) in a relational store; this crate maintains
//! the searchable mirror of that store and answers free-text queries with
//! fuzzy matching and typed filters. See the [`search`] module for the
//! engine itself, [`models`] for the entity seams, and [`repository`] for
//! the rebuild sources.
//!
//! The index lives in one on-disk directory owned by a single
//! [`search::SearchService`] per process. The composition root opens it at
//! startup, passes it to the entity services, and closes it at shutdown.

pub mod models;
pub mod repository;
pub mod search;
