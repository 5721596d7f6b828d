use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mailman_core::{
    AddMembersOptions, GeneralOptionsChanges, MemberSettings, ModerationOptions,
    RemoveMembersOptions,
};
use mailman_logging::mm_info;
use mailman_session::{ListSession, Transport};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::cli::{Command, ModerateArgs};

/// Run one command against an authenticated session and return its result
/// as JSON.
pub fn run<T: Transport>(command: Command, session: &ListSession<T>) -> Result<Value> {
    let value = match command {
        Command::Members => json!(session.member_emails()?),
        Command::Roster => json!(session.roster()?),
        Command::Settings { find } => json!(session.member_settings(find.as_deref())?),
        Command::SetSettings { file } => {
            let members: Vec<MemberSettings> = read_json(&file)?;
            session.set_member_settings(&members)?;
            updated(session, members.len())
        }
        Command::Add {
            emails,
            welcome,
            notify_owner,
        } => json!(session.add_members(
            &emails,
            AddMembersOptions {
                send_welcome_message: welcome,
                notify_owner,
            },
        )?),
        Command::Remove {
            emails,
            ack,
            notify_owner,
        } => json!(session.remove_members(
            &emails,
            RemoveMembersOptions {
                send_acknowledgement: ack,
                notify_owner,
            },
        )?),
        Command::Sync { emails } => json!(session.sync_members(&emails)?),
        Command::Queue => json!(session.moderation_requests()?),
        Command::Show { id } => json!(session.moderation_request_details(id)?),
        Command::Moderate(args) => moderate(session, args)?,
        Command::ModerateAll { state } => {
            session.set_all_moderated(state.enabled())?;
            json!({ "list": session.list(), "all_moderated": state.enabled() })
        }
        Command::AcceptSenders { senders } => {
            session.set_accepted_senders(&senders)?;
            json!({ "list": session.list(), "accepted_senders": senders })
        }
        Command::Options => json!(session.general_options()?),
        Command::SetOptions { file } => {
            let changes: GeneralOptionsChanges = read_json(&file)?;
            session.update_general_options(&changes)?;
            json!({ "list": session.list(), "changes": changes })
        }
        Command::ChunkSize => json!(session.member_chunk_size()?),
    };
    Ok(value)
}

fn moderate<T: Transport>(session: &ListSession<T>, args: ModerateArgs) -> Result<Value> {
    let options = ModerationOptions {
        rejection_message: args.reason,
        preserve_for_admin: args.preserve,
        forward_to_owner: args.forward_to.is_some(),
        forward_address: args.forward_to,
    };
    session.moderate(args.id, args.action, &options)?;
    mm_info!("message {} on {}: {:?}", args.id, session.list(), args.action);
    Ok(json!({ "list": session.list(), "message_id": args.id, "action": args.action }))
}

fn updated<T: Transport>(session: &ListSession<T>, count: usize) -> Value {
    json!({ "list": session.list(), "updated": count })
}

fn read_json<D: DeserializeOwned>(path: &Path) -> Result<D> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
