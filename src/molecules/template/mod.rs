mod resolver;
mod slug;
mod validator;

pub use resolver::{format_date, resolve_template, DEFAULT_DATE_FORMAT, RESERVED_KEYS};
pub use slug::{sanitize_title, slugify};
pub use validator::validate_template;
