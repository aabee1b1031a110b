pub mod connect;
pub mod create;
pub mod delete;
pub mod edit;
pub mod explore;
mod format;
pub mod init;
pub mod list;
pub mod networks;
pub mod price;
pub mod tip;
pub mod verify;
pub mod version;
pub mod view;

pub use connect::{Connect, Switch};
pub use create::Create;
pub use delete::Delete;
pub use edit::Edit;
pub use explore::Explore;
pub use init::Init;
pub use list::List;
pub use networks::Networks;
pub use price::Price;
pub use tip::Tip;
pub use verify::Verify;
pub use version::Version;
pub use view::View;
