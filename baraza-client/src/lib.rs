mod catalog;
pub use catalog::Catalog;

mod forum;
pub use forum::{ForumView, Role, ViewConfig};

mod thread;
pub use thread::{Opinion, Thread, Traverse};

#[cfg(test)]
mod fuzz;

pub mod api {
    pub use baraza_api::*;
}
