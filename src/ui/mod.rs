//! egui rendering of the dashboard. Each function reads the session state
//! (and at most mutates the selector or page); none of them compute data.

pub mod charts;
pub mod panels;
pub mod table;
