//! # Lorebook Architecture
//!
//! Lorebook is a **UI-agnostic wiki core**. This is not a CLI application
//! that happens to have some library code—it's a library that happens to
//! have a terminal client.
//!
//! That distinction drives the architecture. The dataset of characters and
//! locations, the derived path index, the filter engine and the view
//! router are all plain Rust types exchanging plain Rust messages; nothing
//! in here knows about a terminal, and the whole core runs against an
//! in-memory source and a recording renderer in tests.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client Layer (main.rs, cli/)                               │
//! │  - Parses arguments, paints the terminal surfaces           │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (api.rs)                                     │
//! │  - App: owns dataset, index, router, filter engine          │
//! │  - Fixed init order: load → index → initial render → route  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core Logic (router.rs, filter.rs, index.rs)                │
//! │  - Typed navigation intents and filter messages             │
//! │  - Pure over the dataset; renders requested via a trait     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Data Layer (model.rs, store/)                              │
//! │  - Validated typed records, loaded once, immutable after    │
//! │  - DatasetSource trait: FileSource / InMemorySource         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Navigation Protocol
//!
//! The entire protocol between a client surface and the router is a hash
//! fragment in one of two shapes: `#/<pageId>` activates a logical page,
//! `#/explorer/<path>` opens one entry's content page in the explorer.
//! The router runs in one of two modes, detected once at startup: **Spa**
//! (one surface holds every page; the interactive `browse` session) or
//! **MultiPage** (each page is its own short-lived document; the one-shot
//! subcommands). See [`router`] for the full state machine.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular arguments, returns regular
//! types, never writes to stdout or stderr, never exits the process, and
//! never assumes a terminal. Rendering goes through the [`render::Renderer`]
//! trait; the same core could serve a TUI, a web front end, or a test
//! harness unchanged.
//!
//! ## Module Overview
//!
//! - [`api`]: The session facade—wires init order, dispatches messages
//! - [`model`]: Dataset, entries, validation warnings
//! - [`store`]: Dataset source abstraction and backends
//! - [`index`]: Normalized path index and match segmentation
//! - [`filter`]: Predicate composition and the filter engine
//! - [`router`]: Pages, navigation intents, the view router
//! - [`render`]: The render collaborator trait
//! - [`peek`]: Content page previews
//! - [`config`]: Site configuration and root discovery
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod model;
pub mod peek;
pub mod render;
pub mod router;
pub mod store;
