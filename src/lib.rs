//! fishrack - rack grid manager for zebrafish facilities
//!
//! The binary wires the workspace crates together; the library only holds
//! the headless dump so it can be tested without a terminal.

pub mod headless;
