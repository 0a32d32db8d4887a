mod contact;
mod event;
mod neighborhood;
mod news;
mod notification;
mod record;
mod resident;

pub use contact::*;
pub use event::*;
pub use neighborhood::*;
pub use news::*;
pub use notification::*;
pub use record::*;
pub use resident::*;
