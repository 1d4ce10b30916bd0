use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Team {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "createdBy", default, deserialize_with = "super::id_or_object")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Team {
    /// Owner is whoever created the team; everyone else is a member.
    pub fn role_of(&self, member: &Member) -> Role {
        match &self.created_by {
            Some(owner) if *owner == member.id => Role::Owner,
            _ => Role::Member,
        }
    }

    pub fn owner(&self) -> Option<&Member> {
        self.members.iter().find(|m| self.role_of(m) == Role::Owner)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Member {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

impl Member {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Member,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "Owner"),
            Role::Member => write!(f, "Member"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Channel {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, deserialize_with = "super::ids_or_objects")]
    pub members: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CreateChannelRequest {
    pub name: String,
    pub visibility: Visibility,
}
