pub mod history;
pub mod stats;
