//! Progress indication

pub mod indicator;
