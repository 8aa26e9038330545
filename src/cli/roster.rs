//! taskflow roster command implementations.

use serde::Serialize;

use crate::cli::{emit_event, load_roster_session, open_event_sink, CommonOptions};
use crate::error::Result;
use crate::events::EventKind;
use crate::output::{emit_success, HumanOutput};
use crate::roster::{GroupDraft, User, UserDraft, UserGroup};

pub struct UsersOptions {
    pub common: CommonOptions,
}

pub struct GroupsOptions {
    pub common: CommonOptions,
}

pub struct NewUserOptions {
    pub email: String,
    pub first: String,
    pub last: String,
    pub role: String,
    pub inactive: bool,
    pub common: CommonOptions,
}

pub struct NewGroupOptions {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
    pub common: CommonOptions,
}

pub struct SetActiveOptions {
    pub reference: String,
    pub active: bool,
    pub common: CommonOptions,
}

pub struct RmUserOptions {
    pub reference: String,
    pub common: CommonOptions,
}

pub struct RmGroupOptions {
    pub reference: String,
    pub common: CommonOptions,
}

#[derive(Serialize)]
struct UsersOutput {
    total: usize,
    users: Vec<User>,
}

#[derive(Serialize)]
struct GroupsOutput {
    total: usize,
    groups: Vec<UserGroup>,
}

#[derive(Serialize)]
struct UserOutput {
    user: User,
}

#[derive(Serialize)]
struct GroupOutput {
    group: UserGroup,
}

#[derive(Serialize)]
struct RemovedOutput {
    id: String,
    name: String,
}

pub fn run_users(options: UsersOptions) -> Result<()> {
    let session = load_roster_session(&options.common)?;
    let users = session.roster.users();

    let mut human = HumanOutput::new("Users");
    human.push_summary("Total", users.len().to_string());
    for user in &users {
        let groups = session
            .roster
            .groups_for(&user.id)
            .iter()
            .map(|group| group.name.clone())
            .collect::<Vec<_>>();
        let groups = if groups.is_empty() {
            "no groups".to_string()
        } else {
            groups.join(", ")
        };
        let status = if user.active { "active" } else { "inactive" };
        human.push_detail(format!(
            "{} <{}> [{}] ({status}) {groups}",
            user.display_name(),
            user.email,
            user.role.label(),
        ));
    }

    let output = UsersOutput {
        total: users.len(),
        users,
    };
    emit_success(
        options.common.output(false),
        "roster users",
        &output,
        Some(&human),
    )
}

pub fn run_groups(options: GroupsOptions) -> Result<()> {
    let session = load_roster_session(&options.common)?;
    let groups = session.roster.groups();

    let mut human = HumanOutput::new("Groups");
    human.push_summary("Total", groups.len().to_string());
    for group in &groups {
        let members = session
            .roster
            .members_of(group)
            .iter()
            .map(|member| member.display_name())
            .collect::<Vec<_>>();
        human.push_detail(format!(
            "{} ({} members): {}",
            group.name,
            members.len(),
            if members.is_empty() {
                "none".to_string()
            } else {
                members.join(", ")
            }
        ));
    }

    let output = GroupsOutput {
        total: groups.len(),
        groups,
    };
    emit_success(
        options.common.output(false),
        "roster groups",
        &output,
        Some(&human),
    )
}

pub fn run_new_user(options: NewUserOptions) -> Result<()> {
    let mut session = load_roster_session(&options.common)?;
    let (mut sink, events_to_stdout) = open_event_sink(options.common.events.as_deref())?;

    let user = UserDraft {
        email: options.email,
        first_name: options.first,
        last_name: options.last,
        role: options.role.parse()?,
        active: !options.inactive,
    }
    .build()?;
    let stored = session.roster.create_user(user).clone();
    let warning = emit_event(
        &mut sink,
        EventKind::UserCreated,
        &session.author,
        serde_json::json!({ "id": stored.id, "email": stored.email }),
    );

    let mut human = HumanOutput::new("User created");
    if let Some(warning) = warning {
        human.push_warning(warning);
    }
    human.push_summary("Name", stored.display_name());
    human.push_summary("Email", stored.email.clone());
    human.push_summary("Role", stored.role.label());

    let output = UserOutput { user: stored };
    emit_success(
        options.common.output(events_to_stdout),
        "roster new-user",
        &output,
        Some(&human),
    )
}

pub fn run_new_group(options: NewGroupOptions) -> Result<()> {
    let mut session = load_roster_session(&options.common)?;
    let (mut sink, events_to_stdout) = open_event_sink(options.common.events.as_deref())?;

    let members = options
        .members
        .iter()
        .map(|reference| session.roster.resolve_user(reference))
        .collect::<Result<Vec<String>>>()?;

    let group = GroupDraft {
        name: options.name,
        description: options.description.unwrap_or_default(),
        members,
    }
    .build()?;
    let stored = session.roster.create_group(group)?.clone();
    let warning = emit_event(
        &mut sink,
        EventKind::GroupCreated,
        &session.author,
        serde_json::json!({ "id": stored.id, "name": stored.name }),
    );

    let mut human = HumanOutput::new("Group created");
    if let Some(warning) = warning {
        human.push_warning(warning);
    }
    human.push_summary("Name", stored.name.clone());
    human.push_summary("Members", stored.members.len().to_string());

    let output = GroupOutput { group: stored };
    emit_success(
        options.common.output(events_to_stdout),
        "roster new-group",
        &output,
        Some(&human),
    )
}

pub fn run_set_active(options: SetActiveOptions) -> Result<()> {
    let mut session = load_roster_session(&options.common)?;
    let (mut sink, events_to_stdout) = open_event_sink(options.common.events.as_deref())?;

    let user_id = session.roster.resolve_user(&options.reference)?;
    let updated = session.roster.set_active(&user_id, options.active)?.clone();
    let warning = emit_event(
        &mut sink,
        EventKind::UserActiveChanged,
        &session.author,
        serde_json::json!({ "id": updated.id, "active": updated.active }),
    );

    let mut human = HumanOutput::new(if updated.active {
        "User activated"
    } else {
        "User deactivated"
    });
    if let Some(warning) = warning {
        human.push_warning(warning);
    }
    human.push_summary("Name", updated.display_name());
    human.push_summary("Email", updated.email.clone());

    let output = UserOutput { user: updated };
    emit_success(
        options.common.output(events_to_stdout),
        "roster set-active",
        &output,
        Some(&human),
    )
}

pub fn run_rm_user(options: RmUserOptions) -> Result<()> {
    let mut session = load_roster_session(&options.common)?;
    let (mut sink, events_to_stdout) = open_event_sink(options.common.events.as_deref())?;

    let user_id = session.roster.resolve_user(&options.reference)?;
    let removed = session.roster.delete_user(&user_id)?;
    let warning = emit_event(
        &mut sink,
        EventKind::UserDeleted,
        &session.author,
        serde_json::json!({ "id": removed.id, "email": removed.email }),
    );

    let mut human = HumanOutput::new("User deleted");
    if let Some(warning) = warning {
        human.push_warning(warning);
    }
    human.push_summary("Name", removed.display_name());

    let name = removed.display_name();
    let output = RemovedOutput {
        id: removed.id,
        name,
    };
    emit_success(
        options.common.output(events_to_stdout),
        "roster rm-user",
        &output,
        Some(&human),
    )
}

pub fn run_rm_group(options: RmGroupOptions) -> Result<()> {
    let mut session = load_roster_session(&options.common)?;
    let (mut sink, events_to_stdout) = open_event_sink(options.common.events.as_deref())?;

    let group_id = session.roster.resolve_group(&options.reference)?;
    let removed = session.roster.delete_group(&group_id)?;
    let warning = emit_event(
        &mut sink,
        EventKind::GroupDeleted,
        &session.author,
        serde_json::json!({ "id": removed.id, "name": removed.name }),
    );

    let mut human = HumanOutput::new("Group deleted");
    if let Some(warning) = warning {
        human.push_warning(warning);
    }
    human.push_summary("Name", removed.name.clone());

    let output = RemovedOutput {
        id: removed.id,
        name: removed.name,
    };
    emit_success(
        options.common.output(events_to_stdout),
        "roster rm-group",
        &output,
        Some(&human),
    )
}
