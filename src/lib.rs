//! Client-side state and data synchronisation for the Chat Connect social
//! network: a dispatch-only store, pure slice reducers, and async fetchers
//! that reconcile API results back into the store.

pub mod action;
pub mod api;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod mvi;
pub mod navigation;
pub mod session;
pub mod slices;
pub mod store;
