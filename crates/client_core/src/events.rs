//! Results of finished backend calls, as fed to the reducer.

use shared::{
    domain::PhotoId,
    protocol::{Photo, Profile},
};

use crate::{error::ClientError, view_state::Modal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ValidateSession,
    SignIn,
    Register,
    LoadProfile,
    LoadGallery,
    EditProfile,
    EditAvatar,
    AddPhoto,
    DeletePhoto,
    ToggleLike,
    LogOut,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::ValidateSession => "validate session",
            Action::SignIn => "sign in",
            Action::Register => "register",
            Action::LoadProfile => "load profile",
            Action::LoadGallery => "load gallery",
            Action::EditProfile => "edit profile",
            Action::EditAvatar => "edit avatar",
            Action::AddPhoto => "add photo",
            Action::DeletePhoto => "delete photo",
            Action::ToggleLike => "like",
            Action::LogOut => "log out",
        }
    }

    /// Whether `modal` is the form this action was submitted from.
    pub fn owns(self, modal: &Modal) -> bool {
        matches!(
            (self, modal),
            (Action::EditProfile, Modal::EditProfile)
                | (Action::EditAvatar, Modal::EditAvatar)
                | (Action::AddPhoto, Modal::AddPhoto)
                | (Action::DeletePhoto, Modal::ConfirmDelete(_))
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    SessionConfirmed { email: String },
    SessionMissing,
    SignedIn { email: String },
    Registered { email: String },
    ProfileLoaded(Profile),
    GalleryLoaded(Vec<Photo>),
    ProfileUpdated(Profile),
    AvatarUpdated(Profile),
    PhotoCreated(Photo),
    PhotoReplaced(Photo),
    PhotoDeleted(PhotoId),
    SignedOut,
    Failed { action: Action, message: String },
}

impl Completion {
    pub fn failed(action: Action, error: &ClientError) -> Self {
        Completion::Failed {
            action,
            message: error.to_string(),
        }
    }
}
