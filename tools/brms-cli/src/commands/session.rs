//! Session commands.

use anyhow::{Context as _, Result};
use brms_auth::UserProfile;

use super::{SessionArgs, SessionCommand};
use crate::context::Context;
use crate::output::format_duration;

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let sessions = ctx.sessions();

    match args.command {
        SessionCommand::Login {
            id,
            role,
            name,
            email,
            phone,
        } => {
            let mut profile = UserProfile::new(id, role, name, email);
            if let Some(phone) = phone {
                profile = profile.with_phone(phone);
            }
            let session = sessions.login(profile).context("Failed to start session")?;

            if ctx.output.is_json() {
                ctx.output.json(session.record());
                return Ok(());
            }
            ctx.output.success(&format!(
                "Logged in as {} ({})",
                session.profile().name,
                session.role()
            ));
            ctx.output.debug(&format!("Session stored at {}", ctx.session_path().display()));
        }
        SessionCommand::Logout => {
            let removed = sessions.logout().context("Failed to end session")?;
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "loggedOut": removed }));
            } else if removed {
                ctx.output.success("Logged out");
            } else {
                ctx.output.info("No active session");
            }
        }
        SessionCommand::Show => {
            let current = sessions.current().context("Failed to read session")?;

            if ctx.output.is_json() {
                ctx.output.json(&current.as_ref().map(|s| s.record()));
                return Ok(());
            }

            let Some(session) = current else {
                ctx.output.info("Not logged in");
                return Ok(());
            };

            ctx.output.header("Session");
            let profile = session.profile();
            ctx.output.kv("User", &format!("{} <{}>", profile.name, profile.email));
            ctx.output.kv("Id", profile.id.as_str());
            ctx.output.kv("Role", session.role().as_str());
            if let Some(phone) = &profile.phone {
                ctx.output.kv("Phone", phone);
            }
            match session.time_to_expiry() {
                Some(left) => ctx.output.kv(
                    "Expires in",
                    &format_duration(left.num_seconds().max(0) as u64),
                ),
                None => ctx.output.kv("Expires", "never"),
            }
        }
    }

    Ok(())
}
