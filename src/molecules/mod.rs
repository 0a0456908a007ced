pub mod export;
pub mod refine;
pub mod template;
pub mod watch;
