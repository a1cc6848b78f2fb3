use shared::domain::{PhotoId, Route};

/// The single overlay on screen. Photo references live inside the variants that need them, so
/// closing a modal always drops the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    None,
    EditProfile,
    AddPhoto,
    EditAvatar,
    ViewPhoto(PhotoId),
    ConfirmDelete(PhotoId),
    SessionNotice {
        error: bool,
        message: Option<String>,
    },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }

    /// Modals that only make sense over the gallery screen.
    pub fn requires_gallery(&self) -> bool {
        !matches!(self, Modal::None | Modal::SessionNotice { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Modal::None => "none",
            Modal::EditProfile => "edit-profile",
            Modal::AddPhoto => "add-photo",
            Modal::EditAvatar => "edit-avatar",
            Modal::ViewPhoto(_) => "view-photo",
            Modal::ConfirmDelete(_) => "confirm-delete",
            Modal::SessionNotice { .. } => "session-notice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    route: Route,
    modal: Modal,
    inline_error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            route: Route::SignIn,
            modal: Modal::None,
            inline_error: None,
        }
    }
}

impl ViewState {
    pub fn route(&self) -> Route {
        self.route
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    pub fn selected_photo(&self) -> Option<&PhotoId> {
        match &self.modal {
            Modal::ViewPhoto(photo_id) => Some(photo_id),
            _ => None,
        }
    }

    /// Error flag of an open session notice.
    pub fn notice_error(&self) -> Option<bool> {
        match &self.modal {
            Modal::SessionNotice { error, .. } => Some(*error),
            _ => None,
        }
    }

    /// Moves to `target` after applying the route guards; returns the route actually shown.
    pub fn navigate(&mut self, target: Route, signed_in: bool) -> Route {
        let resolved = match (target, signed_in) {
            (Route::Gallery, false) => Route::SignIn,
            (Route::Register | Route::SignIn, true) => Route::Gallery,
            (route, _) => route,
        };
        if resolved != self.route {
            self.modal = Modal::None;
            self.inline_error = None;
        }
        self.route = resolved;
        resolved
    }

    pub fn open(&mut self, modal: Modal) {
        self.modal = modal;
        self.inline_error = None;
    }

    pub fn close(&mut self) -> Modal {
        self.inline_error = None;
        std::mem::take(&mut self.modal)
    }

    pub fn open_notice(&mut self, error: bool, message: Option<String>) {
        self.open(Modal::SessionNotice { error, message });
    }

    pub fn set_inline_error(&mut self, message: impl Into<String>) {
        self.inline_error = Some(message.into());
    }

    pub fn clear_inline_error(&mut self) {
        self.inline_error = None;
    }
}
