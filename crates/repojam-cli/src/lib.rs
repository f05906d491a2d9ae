//! Library side of the `repojam` binary: the GitHub commit source, the
//! keyword mood analyzer, and the command handlers.

pub mod analyze;
pub mod commands;
pub mod github;
