//! Session-aware client for the Mesto photo gallery backend.

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod gallery;
pub mod reducer;
pub mod resources;
pub mod session;
pub mod transport;
pub mod validation;
pub mod view_state;

pub use auth::AuthService;
pub use config::{ClientConfig, StartupPolicy};
pub use controller::Coordinator;
pub use error::{ClientError, ClientResult, Field, HttpError, ValidationError};
pub use events::{Action, Completion};
pub use gallery::Gallery;
pub use reducer::AppModel;
pub use resources::ResourceService;
pub use session::{Session, SessionStore};
pub use transport::{ApiRequest, HttpClient, Transport};
pub use view_state::{Modal, ViewState};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
