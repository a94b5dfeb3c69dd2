//! Bootstrap a local mirror of the Data Carpentry teaching material.
//!
//! The flow is: [`workdir::ensure_working_dir`] resolves and creates
//! `<base>/carpenpi`, then [`orchestrator::run`] fetches every configured
//! URL into it and finally hands the directory to a [`lesson::LessonMirror`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod lesson;
pub mod logging;
pub mod orchestrator;
pub mod url_model;
pub mod workdir;
