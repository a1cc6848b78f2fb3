//! Screen/session state machine driving the services.

use std::sync::Arc;

use futures::{future::BoxFuture, stream::FuturesUnordered, FutureExt, StreamExt};
use shared::{
    domain::{PhotoId, Route},
    protocol::{Photo, Profile},
};
use storage::KeyValueStore;
use tracing::{info, warn};

use crate::{
    auth::AuthService,
    config::{ClientConfig, StartupPolicy},
    error::{ClientError, ClientResult},
    events::{Action, Completion},
    gallery::Gallery,
    reducer::AppModel,
    resources::ResourceService,
    session::SessionStore,
    transport::HttpClient,
    view_state::{Modal, ViewState},
};

pub struct Coordinator {
    auth: AuthService,
    resources: ResourceService,
    startup: StartupPolicy,
    model: AppModel,
}

impl Coordinator {
    pub fn new(auth: AuthService, resources: ResourceService, startup: StartupPolicy) -> Self {
        Self {
            auth,
            resources,
            startup,
            model: AppModel::default(),
        }
    }

    /// Wires HTTP clients for both backends and a session store over `store`.
    pub fn from_config(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        let api = HttpClient::new(&config.api_base_url, config.api_token.as_deref())?;
        let identity = HttpClient::new(&config.auth_base_url, config.api_token.as_deref())?;
        let sessions = Arc::new(SessionStore::new(store));
        Ok(Self::new(
            AuthService::new(Arc::new(identity), sessions),
            ResourceService::new(Arc::new(api)),
            config.startup,
        ))
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn view(&self) -> &ViewState {
        &self.model.view
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.model.profile.as_ref()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.model.gallery
    }

    pub fn email(&self) -> Option<&str> {
        self.model.email.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.model.signed_in
    }

    pub fn apply(&mut self, completion: Completion) {
        self.model.apply(completion);
    }

    pub async fn start(&mut self) {
        match self.startup {
            StartupPolicy::GatedOnSession => {
                let completion = match self.auth.validate_existing_token().await {
                    Some(identity) => Completion::SessionConfirmed {
                        email: identity.email,
                    },
                    None => Completion::SessionMissing,
                };
                let confirmed = matches!(completion, Completion::SessionConfirmed { .. });
                self.apply(completion);
                if confirmed {
                    self.load_content().await;
                }
            }
            StartupPolicy::Concurrent => {
                let auth = &self.auth;
                let resources = &self.resources;
                let mut pending: FuturesUnordered<BoxFuture<'_, Completion>> =
                    FuturesUnordered::new();
                pending.push(
                    async move {
                        match auth.validate_existing_token().await {
                            Some(identity) => Completion::SessionConfirmed {
                                email: identity.email,
                            },
                            None => Completion::SessionMissing,
                        }
                    }
                    .boxed(),
                );
                pending.push(profile_task(resources));
                pending.push(gallery_task(resources));
                while let Some(completion) = pending.next().await {
                    self.model.apply(completion);
                }
            }
        }
        info!(route = ?self.model.view.route(), "startup finished");
    }

    /// Fetches profile and gallery concurrently, applying each as it lands.
    async fn load_content(&mut self) {
        let resources = &self.resources;
        let mut pending: FuturesUnordered<BoxFuture<'_, Completion>> = FuturesUnordered::new();
        pending.push(profile_task(resources));
        pending.push(gallery_task(resources));
        while let Some(completion) = pending.next().await {
            self.model.apply(completion);
        }
    }

    pub fn navigate(&mut self, target: Route) -> Route {
        self.model.navigate(target)
    }

    pub fn navigate_path(&mut self, path: &str) -> Route {
        self.navigate(Route::from_path(path))
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> ClientResult<()> {
        self.require_route(Action::SignIn, Route::SignIn)?;
        match self.auth.authenticate(email, password).await {
            Ok(session) => {
                self.apply(Completion::SignedIn {
                    email: session.email.unwrap_or_default(),
                });
                self.load_content().await;
                Ok(())
            }
            Err(err) => Err(self.fail(Action::SignIn, err)),
        }
    }

    pub async fn register(&mut self, email: &str, password: &str) -> ClientResult<()> {
        self.require_route(Action::Register, Route::Register)?;
        match self.auth.register(email, password).await {
            Ok(identity) => {
                self.apply(Completion::Registered {
                    email: identity.email,
                });
                Ok(())
            }
            Err(err) => Err(self.fail(Action::Register, err)),
        }
    }

    pub async fn log_out(&mut self) -> ClientResult<()> {
        self.require_route(Action::LogOut, Route::Gallery)?;
        match self.auth.log_out().await {
            Ok(()) => {
                self.apply(Completion::SignedOut);
                Ok(())
            }
            Err(err) => Err(self.fail(Action::LogOut, err)),
        }
    }

    pub fn open_edit_profile(&mut self) -> ClientResult<()> {
        self.open_modal(Modal::EditProfile)
    }

    pub fn open_add_photo(&mut self) -> ClientResult<()> {
        self.open_modal(Modal::AddPhoto)
    }

    pub fn open_edit_avatar(&mut self) -> ClientResult<()> {
        self.open_modal(Modal::EditAvatar)
    }

    pub fn open_photo(&mut self, photo_id: &PhotoId) -> ClientResult<()> {
        self.photo(photo_id, "view photo")?;
        self.open_modal(Modal::ViewPhoto(photo_id.clone()))
    }

    /// Asks for confirmation before deleting one of the current user's photos.
    pub fn request_delete(&mut self, photo_id: &PhotoId) -> ClientResult<()> {
        let photo = self.photo(photo_id, "delete photo")?;
        let user_id = self
            .model
            .current_user()
            .ok_or_else(|| ClientError::invalid_state("delete photo", "profile not loaded"))?;
        if !photo.is_owned_by(user_id) {
            return Err(ClientError::invalid_state(
                "delete photo",
                format!("photo {photo_id} belongs to someone else"),
            ));
        }
        self.open_modal(Modal::ConfirmDelete(photo_id.clone()))
    }

    pub fn close_modal(&mut self) -> Modal {
        self.model.close_modal()
    }

    pub async fn submit_profile(&mut self, name: &str, about: &str) -> ClientResult<()> {
        self.require_modal(Action::EditProfile)?;
        match self.resources.update_profile(name, about).await {
            Ok(profile) => {
                self.apply(Completion::ProfileUpdated(profile));
                Ok(())
            }
            Err(err) => Err(self.fail(Action::EditProfile, err)),
        }
    }

    pub async fn submit_avatar(&mut self, avatar_url: &str) -> ClientResult<()> {
        self.require_modal(Action::EditAvatar)?;
        match self.resources.update_avatar(avatar_url).await {
            Ok(profile) => {
                self.apply(Completion::AvatarUpdated(profile));
                Ok(())
            }
            Err(err) => Err(self.fail(Action::EditAvatar, err)),
        }
    }

    pub async fn submit_photo(&mut self, name: &str, image_url: &str) -> ClientResult<()> {
        self.require_modal(Action::AddPhoto)?;
        match self.resources.create_photo(name, image_url).await {
            Ok(photo) => {
                self.apply(Completion::PhotoCreated(photo));
                Ok(())
            }
            Err(err) => Err(self.fail(Action::AddPhoto, err)),
        }
    }

    pub async fn confirm_delete(&mut self) -> ClientResult<()> {
        let Modal::ConfirmDelete(photo_id) = self.model.view.modal().clone() else {
            return Err(ClientError::invalid_state(
                Action::DeletePhoto.name(),
                "no deletion awaiting confirmation",
            ));
        };
        match self.resources.delete_photo(&photo_id).await {
            Ok(()) => {
                self.apply(Completion::PhotoDeleted(photo_id));
                Ok(())
            }
            Err(err) => Err(self.fail(Action::DeletePhoto, err)),
        }
    }

    pub async fn toggle_like(&mut self, photo_id: &PhotoId) -> ClientResult<()> {
        self.require_route(Action::ToggleLike, Route::Gallery)?;
        let photo = self.photo(photo_id, Action::ToggleLike.name())?.clone();
        let user_id = self
            .model
            .current_user()
            .cloned()
            .ok_or_else(|| ClientError::invalid_state("like", "profile not loaded"))?;
        match self.resources.toggle_like(&photo, &user_id).await {
            Ok(updated) => {
                self.apply(Completion::PhotoReplaced(updated));
                Ok(())
            }
            Err(err) => Err(self.fail(Action::ToggleLike, err)),
        }
    }

    fn open_modal(&mut self, modal: Modal) -> ClientResult<()> {
        if modal.requires_gallery() && self.model.view.route() != Route::Gallery {
            return Err(ClientError::invalid_state(
                modal.name(),
                "only available on the gallery screen",
            ));
        }
        self.model.view.open(modal);
        Ok(())
    }

    fn photo(&self, photo_id: &PhotoId, action: &'static str) -> ClientResult<&Photo> {
        self.model
            .gallery
            .get(photo_id)
            .ok_or_else(|| ClientError::invalid_state(action, format!("photo {photo_id} is not in the gallery")))
    }

    fn require_route(&self, action: Action, route: Route) -> ClientResult<()> {
        if self.model.view.route() == route {
            Ok(())
        } else {
            Err(ClientError::invalid_state(
                action.name(),
                format!("current screen is {}", self.model.view.route().path()),
            ))
        }
    }

    fn require_modal(&self, action: Action) -> ClientResult<()> {
        if action.owns(self.model.view.modal()) {
            Ok(())
        } else {
            Err(ClientError::invalid_state(
                action.name(),
                format!("open modal is {}", self.model.view.modal().name()),
            ))
        }
    }

    /// Records a failed action in the view and hands the error back to the caller.
    fn fail(&mut self, action: Action, err: ClientError) -> ClientError {
        match &err {
            ClientError::Validation(validation) => {
                self.model.view.set_inline_error(validation.to_string());
            }
            ClientError::InvalidState { .. } => {}
            _ => self.model.apply(Completion::failed(action, &err)),
        }
        if !err.is_remote() {
            warn!(action = action.name(), error = %err, "action rejected");
        }
        err
    }
}

fn profile_task(resources: &ResourceService) -> BoxFuture<'_, Completion> {
    async move {
        match resources.fetch_profile().await {
            Ok(profile) => Completion::ProfileLoaded(profile),
            Err(err) => Completion::failed(Action::LoadProfile, &err),
        }
    }
    .boxed()
}

fn gallery_task(resources: &ResourceService) -> BoxFuture<'_, Completion> {
    async move {
        match resources.fetch_gallery().await {
            Ok(photos) => Completion::GalleryLoaded(photos),
            Err(err) => Completion::failed(Action::LoadGallery, &err),
        }
    }
    .boxed()
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
