//! JSON-RPC 2.0 communication layer between the host glue and the engine.
//!
//! The glue relays element lifecycle over `postMessage`: `set_model` when
//! the `id` attribute changes, `disconnect` when the element leaves the
//! document, plus `get_camera`/`get_status` queries. The engine pushes
//! `viewer_ready`, `loading_progress`, `model_ready`, and `load_failed`
//! notifications the host may mirror in its own UI.
//!
//! Requests carry an id and receive a response; notifications are one-way.

/// Message structures, the transport resource, and the method dispatch.
pub mod host_rpc;
