use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(PhotoId);

/// Screens reachable in the client, keyed by their path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Gallery,
    Register,
    SignIn,
}

impl Route {
    /// Resolves a path the way the router does: unknown paths fall back to the gallery.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/signup" => Route::Register,
            "/signin" => Route::SignIn,
            _ => Route::Gallery,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Gallery => "/",
            Route::Register => "/signup",
            Route::SignIn => "/signin",
        }
    }
}
