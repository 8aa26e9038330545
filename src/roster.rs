//! User, group, and role administration.
//!
//! A structurally independent CRUD slice next to the task board. Roles are
//! display metadata carried on the user record; nothing here or elsewhere
//! enforces them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::new_id;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperUser,
    Admin,
    Manager,
    Executive,
    #[default]
    User,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::SuperUser,
        UserRole::Admin,
        UserRole::Manager,
        UserRole::Executive,
        UserRole::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperUser => "super_user",
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Executive => "executive",
            UserRole::User => "user",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::SuperUser => "Super User",
            UserRole::Admin => "Admin",
            UserRole::Manager => "Manager",
            UserRole::Executive => "Executive",
            UserRole::User => "User",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "unknown role '{trimmed}' (expected super_user|admin|manager|executive|user)"
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl User {
    /// "First Last", as the admin screens render it.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Membership lives on the group; a user's group list is derived via
/// [`RosterStore::groups_for`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Raw user fields from input events.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub active: bool,
}

impl UserDraft {
    pub fn build(self) -> Result<User> {
        let email = required(&self.email, "email")?;
        let first_name = required(&self.first_name, "first name")?;
        let last_name = required(&self.last_name, "last name")?;

        Ok(User {
            id: new_id(),
            email,
            first_name,
            last_name,
            role: self.role,
            created_at: Utc::now(),
            active: self.active,
        })
    }
}

/// Raw group fields from input events. Member ids are checked against the
/// store at creation, not here.
#[derive(Debug, Clone, Default)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
}

impl GroupDraft {
    pub fn build(self) -> Result<UserGroup> {
        let name = required(&self.name, "group name")?;

        Ok(UserGroup {
            id: new_id(),
            name,
            description: self.description,
            members: self.members,
        })
    }
}

fn required(raw: &str, field: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Owns the user and group collections for a session. Both collections
/// append in creation order.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    users: Vec<User>,
    groups: Vec<UserGroup>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn create_user(&mut self, user: User) -> &User {
        self.users.push(user);
        &self.users[self.users.len() - 1]
    }

    /// Add a group after checking that every member id refers to a known
    /// user.
    pub fn create_group(&mut self, group: UserGroup) -> Result<&UserGroup> {
        for member in &group.members {
            if !self.users.iter().any(|user| &user.id == member) {
                return Err(Error::UserNotFound(member.clone()));
            }
        }
        self.groups.push(group);
        Ok(&self.groups[self.groups.len() - 1])
    }

    /// Flip a user's active flag.
    pub fn set_active(&mut self, user_id: &str, active: bool) -> Result<&User> {
        let slot = self.user_position(user_id)?;
        self.users[slot].active = active;
        Ok(&self.users[slot])
    }

    /// Remove a user, scrubbing them from every group's member list.
    pub fn delete_user(&mut self, user_id: &str) -> Result<User> {
        let slot = self.user_position(user_id)?;
        let user = self.users.remove(slot);
        for group in &mut self.groups {
            group.members.retain(|member| member != &user.id);
        }
        Ok(user)
    }

    pub fn delete_group(&mut self, group_id: &str) -> Result<UserGroup> {
        let slot = self
            .groups
            .iter()
            .position(|group| group.id == group_id)
            .ok_or_else(|| Error::GroupNotFound(group_id.to_string()))?;
        Ok(self.groups.remove(slot))
    }

    pub fn get_user(&self, user_id: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))
    }

    /// Resolve a user reference: exact id first, then exact email.
    pub fn resolve_user(&self, reference: &str) -> Result<String> {
        let trimmed = reference.trim();
        self.users
            .iter()
            .find(|user| user.id == trimmed || user.email.eq_ignore_ascii_case(trimmed))
            .map(|user| user.id.clone())
            .ok_or_else(|| Error::UserNotFound(trimmed.to_string()))
    }

    /// Resolve a group reference: exact id first, then exact name.
    pub fn resolve_group(&self, reference: &str) -> Result<String> {
        let trimmed = reference.trim();
        self.groups
            .iter()
            .find(|group| group.id == trimmed || group.name.eq_ignore_ascii_case(trimmed))
            .map(|group| group.id.clone())
            .ok_or_else(|| Error::GroupNotFound(trimmed.to_string()))
    }

    /// Groups the user belongs to, in group creation order.
    pub fn groups_for(&self, user_id: &str) -> Vec<&UserGroup> {
        self.groups
            .iter()
            .filter(|group| group.members.iter().any(|member| member == user_id))
            .collect()
    }

    /// Member records for a group, in roster order.
    pub fn members_of(&self, group: &UserGroup) -> Vec<&User> {
        self.users
            .iter()
            .filter(|user| group.members.contains(&user.id))
            .collect()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    pub fn groups(&self) -> Vec<UserGroup> {
        self.groups.clone()
    }

    fn user_position(&self, user_id: &str) -> Result<usize> {
        self.users
            .iter()
            .position(|user| user.id == user_id)
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))
    }
}
