// Rust guideline compliant 2026-10-18

//! Command implementations for the Coupons CLI.

pub mod add;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod mark_used;
pub mod restore;
pub mod show;
pub mod stats;
