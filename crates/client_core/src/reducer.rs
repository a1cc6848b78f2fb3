//! Applies completed calls to client state. Completions may arrive late, after the user has moved
//! on, so every arm tolerates state it did not expect.

use shared::{
    domain::{PhotoId, Route, UserId},
    protocol::Profile,
};
use tracing::{debug, warn};

use crate::{
    events::{Action, Completion},
    gallery::Gallery,
    view_state::{Modal, ViewState},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppModel {
    pub view: ViewState,
    pub profile: Option<Profile>,
    pub gallery: Gallery,
    pub email: Option<String>,
    pub signed_in: bool,
}

impl AppModel {
    pub fn current_user(&self) -> Option<&UserId> {
        self.profile.as_ref().map(|profile| &profile.id)
    }

    pub fn navigate(&mut self, target: Route) -> Route {
        self.view.navigate(target, self.signed_in)
    }

    /// Closes whatever is open. Dismissing a successful registration notice leads to sign-in.
    pub fn close_modal(&mut self) -> Modal {
        let closed = self.view.close();
        if let Modal::SessionNotice { error: false, .. } = closed {
            if self.view.route() == Route::Register {
                self.navigate(Route::SignIn);
            }
        }
        closed
    }

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::SessionConfirmed { email } | Completion::SignedIn { email } => {
                self.signed_in = true;
                self.email = Some(email);
                self.navigate(Route::Gallery);
            }
            Completion::SessionMissing => {
                self.signed_in = false;
                if self.view.route() == Route::Gallery {
                    self.navigate(Route::SignIn);
                }
            }
            Completion::Registered { email } => {
                self.view
                    .open_notice(false, Some(format!("{email} is registered; sign in to continue")));
            }
            Completion::ProfileLoaded(profile) => self.profile = Some(profile),
            Completion::GalleryLoaded(photos) => self.gallery.load(photos),
            Completion::ProfileUpdated(profile) => {
                self.profile = Some(profile);
                self.close_if(Action::EditProfile);
            }
            Completion::AvatarUpdated(profile) => {
                self.profile = Some(profile);
                self.close_if(Action::EditAvatar);
            }
            Completion::PhotoCreated(photo) => {
                self.gallery.prepend(photo);
                self.close_if(Action::AddPhoto);
            }
            Completion::PhotoReplaced(photo) => {
                let photo_id = photo.id.clone();
                if !self.gallery.replace(photo) {
                    debug!(%photo_id, "dropping update for photo no longer in gallery");
                }
            }
            Completion::PhotoDeleted(photo_id) => {
                self.gallery.remove(&photo_id);
                if self.modal_targets(&photo_id) {
                    self.view.close();
                }
            }
            Completion::SignedOut => {
                self.signed_in = false;
                self.email = None;
                self.profile = None;
                self.gallery.clear();
                self.navigate(Route::SignIn);
            }
            Completion::Failed { action, message } => self.apply_failure(action, message),
        }
    }

    fn apply_failure(&mut self, action: Action, message: String) {
        warn!(action = action.name(), %message, "action failed");
        match action {
            Action::ValidateSession => {}
            Action::SignIn | Action::Register | Action::ToggleLike | Action::LogOut => {
                self.view.open_notice(true, Some(message));
            }
            Action::LoadProfile | Action::LoadGallery => {
                if self.view.route() == Route::Gallery {
                    self.view.open_notice(true, Some(message));
                }
            }
            Action::EditProfile | Action::EditAvatar | Action::AddPhoto | Action::DeletePhoto => {
                if action.owns(self.view.modal()) {
                    self.view.set_inline_error(message);
                } else {
                    self.view.open_notice(true, Some(message));
                }
            }
        }
    }

    fn close_if(&mut self, action: Action) {
        if action.owns(self.view.modal()) {
            self.view.close();
        }
    }

    fn modal_targets(&self, photo_id: &PhotoId) -> bool {
        matches!(
            self.view.modal(),
            Modal::ViewPhoto(id) | Modal::ConfirmDelete(id) if id == photo_id
        )
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
