//! Round progress reporters

pub mod reporter;
