//! Domain services used by HTTP routes.
//!
//! Service modules own business logic so route handlers can stay focused on
//! protocol translation.

pub mod contact;
