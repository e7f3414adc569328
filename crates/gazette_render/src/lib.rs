pub mod escape;
pub mod page;
pub mod site;

pub use escape::escape_html;
pub use site::SiteWriter;
