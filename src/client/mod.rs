pub mod identity;
pub mod session;
pub mod transport;

pub use identity::{Identity, IdentityProvider, LocalIdentityProvider, User};
pub use session::{ChatSession, PendingTurn};
pub use transport::{ChatTransport, ClientError, ProxyTransport};
