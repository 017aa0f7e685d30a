//! Text rendering: display dates and Markdown export

pub mod dates;
pub mod markdown;

pub use dates::{days_since, days_since_from, format_display_date, truncate_text};
pub use markdown::{
    ExportError, ExportScope, export_all_projects, export_filename, export_project, render,
    write_export,
};
