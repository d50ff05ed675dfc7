// Storage operation traits and implementations
pub mod backup;
pub mod list;
pub mod restore;
pub mod sync;

pub use backup::Copier;
pub use list::Lister;
pub use restore::Restorer;
pub use sync::Syncer;
