use mailman_core::field_name::setting_field;
use mailman_core::forms::{
    accepted_senders_form, add_members_form, all_moderated_form, general_options_form,
    login_form, member_settings_form, moderation_form, remove_members_form, sync_members_form,
};
use mailman_core::{
    extract_member_settings, AddMembersOptions, FormPayload, GeneralOptionsChanges,
    MemberSettings, ModerationAction, ModerationOptions, PageLayout, RemoveMembersOptions,
    SettingKey,
};
use pretty_assertions::assert_eq;

fn pairs(form: &FormPayload) -> Vec<(&str, &str)> {
    form.pairs()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Render the members table the way the server would after accepting `form`.
fn page_from_payload(form: &FormPayload) -> String {
    let mut rows = String::new();
    for user in form.values("user") {
        let email = mailman_core::field_name::decode_address(user).unwrap();
        rows.push_str("<tr>");
        rows.push_str(&format!(
            r#"<td><INPUT name="{user}_unsub" type="CHECKBOX" value="off"></td><td><a href="x">{email}</a></td>"#
        ));
        for key in SettingKey::ALL {
            let name = setting_field(&email, key);
            let checked = if form.contains(&name) { " CHECKED" } else { "" };
            rows.push_str(&format!(
                r#"<td><INPUT name="{name}" type="CHECKBOX" value="on"{checked}></td>"#
            ));
        }
        rows.push_str(r#"<td><INPUT name="user_language" type="HIDDEN"></td></tr>"#);
    }
    format!(
        r#"<html><body><form><table WIDTH="90%" BORDER="2">
<tr><td COLSPAN="11"><strong>Membership List</strong></td></tr>
<tr><td>unsub</td><td>member address</td><td>mod</td><td>hide</td></tr>
{rows}
</table></form></body></html>"#
    )
}

#[test]
fn member_settings_survive_encode_and_extract() {
    let mut first = MemberSettings::new("first_last@example.com");
    first.moderated = true;
    first.no_dupes = true;
    first.plain_text_digest = true;
    let mut second = MemberSettings::new("o'neil+lists@example.org");
    second.hidden = true;
    second.digest = true;
    let third = MemberSettings::new("quiet@example.net");
    let members = vec![first, second, third];

    let layout = PageLayout::default();
    let form = member_settings_form(&members, &layout);
    let extracted = extract_member_settings(&page_from_payload(&form), &layout).unwrap();
    assert_eq!(extracted, members);
}

#[test]
fn only_enabled_flags_are_submitted() {
    let mut settings = MemberSettings::new("a@example.com");
    settings.moderated = true;
    settings.ack = true;

    let form = member_settings_form(&[settings], &PageLayout::default());
    assert_eq!(
        pairs(&form),
        vec![
            ("user", "a%40example.com"),
            ("a%40example.com_mod", "on"),
            ("a%40example.com_ack", "on"),
            ("setmemberopts_btn", "Submit Your Changes"),
        ]
    );
}

#[test]
fn multi_member_payload_keeps_repeated_keys() {
    let members = [
        MemberSettings::new("a@example.com"),
        MemberSettings::new("b@example.com"),
    ];
    let form = member_settings_form(&members, &PageLayout::default());
    assert_eq!(
        form.values("user").collect::<Vec<_>>(),
        ["a%40example.com", "b%40example.com"]
    );
}

#[test]
fn login_posts_password_and_button() {
    let form = login_form("s3cret", &PageLayout::default());
    assert_eq!(
        pairs(&form),
        vec![("adminpw", "s3cret"), ("admlogin", "Let me in...")]
    );
}

#[test]
fn bulk_forms_join_addresses_with_newlines() {
    let layout = PageLayout::default();
    let emails = strings(&["a@x.com", "b@x.com"]);

    let add = add_members_form(
        &emails,
        AddMembersOptions {
            send_welcome_message: true,
            notify_owner: false,
        },
        &layout,
    );
    assert_eq!(
        pairs(&add),
        vec![
            ("subscribe_or_invite", "0"),
            ("send_welcome_msg_to_this_batch", "1"),
            ("send_notifications_to_list_owner", "0"),
            ("subscribees", "a@x.com\nb@x.com"),
            ("setmemberopts_btn", "Submit Your Changes"),
        ]
    );

    let remove = remove_members_form(&emails, RemoveMembersOptions::default(), &layout);
    assert_eq!(remove.first("unsubscribees"), Some("a@x.com\nb@x.com"));
    assert_eq!(remove.first("send_unsub_ack_to_this_batch"), Some("0"));

    let sync = sync_members_form(&emails, &layout);
    assert_eq!(sync.first("memberlist"), Some("a@x.com\nb@x.com"));
}

#[test]
fn moderation_form_includes_only_requested_extras() {
    let layout = PageLayout::default();
    let plain = moderation_form(7, ModerationAction::Approve, &ModerationOptions::default(), &layout);
    assert_eq!(pairs(&plain), vec![("7", "1"), ("submit", "Submit All Data")]);

    let options = ModerationOptions {
        rejection_message: Some("Off topic".to_string()),
        preserve_for_admin: true,
        forward_to_owner: true,
        forward_address: Some("owner@example.com".to_string()),
    };
    let full = moderation_form(7, ModerationAction::Reject, &options, &layout);
    assert_eq!(
        pairs(&full),
        vec![
            ("7", "2"),
            ("comment-7", "Off topic"),
            ("preserve-7", "on"),
            ("forward-7", "on"),
            ("forward-addr-7", "owner@example.com"),
            ("submit", "Submit All Data"),
        ]
    );
}

#[test]
fn global_moderation_and_sender_filters() {
    let layout = PageLayout::default();
    assert_eq!(
        pairs(&all_moderated_form(true, &layout)),
        vec![("allmodbit_val", "1"), ("allmodbit_btn", "Set")]
    );
    let senders = accepted_senders_form(&strings(&["a@x.com", "^.*@trusted\\.org$"]), &layout);
    assert_eq!(
        senders.first("accept_these_nonmembers"),
        Some("a@x.com\n^.*@trusted\\.org$")
    );
}

#[test]
fn unset_option_changes_are_omitted() {
    let changes = GeneralOptionsChanges {
        send_reminders: Some(false),
        welcome_msg: Some("Hello".to_string()),
        admin_member_chunksize: Some(50),
        ..GeneralOptionsChanges::default()
    };
    let form = general_options_form(&changes, &PageLayout::default());
    assert_eq!(
        pairs(&form),
        vec![
            ("send_reminders", "0"),
            ("welcome_msg", "Hello"),
            ("admin_member_chunksize", "50"),
            ("submit", "Submit Your Changes"),
        ]
    );

    let empty = general_options_form(&GeneralOptionsChanges::default(), &PageLayout::default());
    assert_eq!(pairs(&empty), vec![("submit", "Submit Your Changes")]);
}
