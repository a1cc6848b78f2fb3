use std::fmt::Write;

use clap::Subcommand;
use client_core::{ClientResult, Coordinator, Modal};
use shared::domain::{PhotoId, Route};
use tracing::info;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current route and session.
    Status,
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signout,
    Profile,
    EditProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        about: String,
    },
    EditAvatar {
        #[arg(long)]
        link: String,
    },
    Gallery,
    View {
        id: String,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        link: String,
    },
    Delete {
        id: String,
    },
    /// Like the photo, or remove the like if already given.
    Like {
        id: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::Signup { .. } => "signup",
            Command::Signin { .. } => "signin",
            Command::Signout => "signout",
            Command::Profile => "profile",
            Command::EditProfile { .. } => "edit-profile",
            Command::EditAvatar { .. } => "edit-avatar",
            Command::Gallery => "gallery",
            Command::View { .. } => "view",
            Command::Add { .. } => "add",
            Command::Delete { .. } => "delete",
            Command::Like { .. } => "like",
        }
    }

    fn shows_gallery(&self) -> bool {
        matches!(
            self,
            Command::Gallery
                | Command::Signin { .. }
                | Command::Add { .. }
                | Command::Delete { .. }
                | Command::Like { .. }
        )
    }

    fn shows_profile(&self) -> bool {
        matches!(
            self,
            Command::Profile
                | Command::Signin { .. }
                | Command::EditProfile { .. }
                | Command::EditAvatar { .. }
        )
    }
}

/// Runs one command against an already started coordinator.
pub async fn run(coordinator: &mut Coordinator, command: &Command) -> ClientResult<()> {
    info!(command = command.name(), route = ?coordinator.view().route(), "running command");
    match command {
        Command::Status | Command::Profile | Command::Gallery => Ok(()),
        Command::Signup { email, password } => {
            coordinator.navigate(Route::Register);
            coordinator.register(email, password).await
        }
        Command::Signin { email, password } => {
            if coordinator.is_signed_in() {
                return Ok(());
            }
            coordinator.navigate(Route::SignIn);
            coordinator.sign_in(email, password).await
        }
        Command::Signout => coordinator.log_out().await,
        Command::EditProfile { name, about } => {
            coordinator.open_edit_profile()?;
            coordinator.submit_profile(name, about).await
        }
        Command::EditAvatar { link } => {
            coordinator.open_edit_avatar()?;
            coordinator.submit_avatar(link).await
        }
        Command::View { id } => coordinator.open_photo(&PhotoId::new(id.as_str())),
        Command::Add { name, link } => {
            coordinator.open_add_photo()?;
            coordinator.submit_photo(name, link).await
        }
        Command::Delete { id } => {
            coordinator.request_delete(&PhotoId::new(id.as_str()))?;
            coordinator.confirm_delete().await
        }
        Command::Like { id } => coordinator.toggle_like(&PhotoId::new(id.as_str())).await,
    }
}

pub fn render(coordinator: &Coordinator, command: &Command) -> String {
    let mut out = String::new();
    let view = coordinator.view();

    let _ = writeln!(out, "route: {}", view.route().path());
    match coordinator.email() {
        Some(email) if coordinator.is_signed_in() => {
            let _ = writeln!(out, "signed in as {email}");
        }
        _ => {
            let _ = writeln!(out, "signed out");
        }
    }

    match view.modal() {
        Modal::SessionNotice { error, message } => {
            let label = if *error { "error" } else { "ok" };
            let _ = writeln!(
                out,
                "notice [{label}]: {}",
                message.as_deref().unwrap_or(if *error {
                    "something went wrong"
                } else {
                    "done"
                })
            );
        }
        Modal::None => {}
        modal => {
            let _ = writeln!(out, "modal: {}", modal.name());
        }
    }
    if let Some(message) = view.inline_error() {
        let _ = writeln!(out, "error: {message}");
    }

    if command.shows_profile() {
        if let Some(profile) = coordinator.profile() {
            let _ = writeln!(out, "profile: {} ({})", profile.name, profile.about);
            let _ = writeln!(out, "avatar: {}", profile.avatar_url);
        }
    }

    if let Some(photo_id) = view.selected_photo() {
        if let Some(photo) = coordinator.gallery().get(photo_id) {
            let _ = writeln!(out, "{}: {}", photo.name, photo.image_url);
            let _ = writeln!(out, "by {}, {} likes", photo.owner.name, photo.like_count());
        }
    }

    if command.shows_gallery() {
        let me = coordinator.model().current_user();
        let _ = writeln!(out, "photos: {}", coordinator.gallery().len());
        for photo in coordinator.gallery().photos() {
            let liked = me.is_some_and(|id| photo.is_liked_by(id));
            let mine = me.is_some_and(|id| photo.is_owned_by(id));
            let _ = writeln!(
                out,
                "  {} {:<30} {:>3} {}{}",
                photo.id,
                photo.name,
                photo.like_count(),
                if liked { "liked" } else { "" },
                if mine { " (yours)" } else { "" }
            );
        }
    }

    out
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
