mod config_io;
mod draft_io;
pub mod file_watcher;
mod reference_io;

pub use config_io::{
    config_dir, config_path, expand_tilde, load_config, load_config_from, resolve_data_dir,
    save_config_to,
};
pub use draft_io::{
    delete_draft, drafts_dir, ensure_data_dirs, is_valid_draft_id, load_all_drafts, load_draft,
    record_id, save_draft,
};
pub use file_watcher::{start_watcher, FileEvent, FileWatcherHandle};
pub use reference_io::read_reference;
