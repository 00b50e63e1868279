use crate::error::{Error, PlanResult};
use crate::session::Session;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A guest's response to a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GuestStatus {
    Invited,
    Going,
    Declined,
}

impl GuestStatus {
    pub const ALL: [GuestStatus; 3] = [Self::Invited, Self::Going, Self::Declined];

    /// The label the platform uses for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invited => "INVITED",
            Self::Going => "GOING",
            Self::Declined => "DECLINED",
        }
    }

    /// Look up a status by its upstream label. Unknown labels are an error,
    /// never a default.
    pub fn from_label(label: &str) -> PlanResult<Self> {
        match label {
            "INVITED" => Ok(Self::Invited),
            "GOING" => Ok(Self::Going),
            "DECLINED" => Ok(Self::Declined),
            other => Err(Error::UnknownGuestStatusLabel(other.to_string())),
        }
    }
}

impl FromStr for GuestStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity shared by every plan representation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    #[serde(skip)]
    pub(crate) session: Arc<Session>,
    pub(crate) id: String,
}

impl Plan {
    pub fn new(session: Arc<Session>, id: impl Into<String>) -> Self {
        Self {
            session,
            id: id.into(),
        }
    }

    /// The session to use when making requests
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The plan's unique identifier
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Normalized data about a plan, whichever payload shape it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanData {
    #[serde(flatten)]
    pub(crate) plan: Plan,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub(crate) time: DateTime<Utc>,
    pub(crate) title: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) location_id: Option<String>,
    pub(crate) author_id: Option<String>,
    pub(crate) guests: Option<HashMap<String, GuestStatus>>,
}

impl PlanData {
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn session(&self) -> &Arc<Session> {
        self.plan.session()
    }

    pub fn id(&self) -> &str {
        self.plan.id()
    }

    /// Plan time, only precise down to the minute
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Plan time in the given timezone
    pub fn local_time(&self, tz: Tz) -> DateTime<Tz> {
        self.time.with_timezone(&tz)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Location name. Empty rather than missing for pull feed and fetch
    /// payloads; graph payloads pass a missing name through as `None`.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn location_id(&self) -> Option<&str> {
        self.location_id.as_deref()
    }

    /// ID of the plan creator
    pub fn author_id(&self) -> Option<&str> {
        self.author_id.as_deref()
    }

    /// User IDs mapped to their guest status
    pub fn guests(&self) -> Option<&HashMap<String, GuestStatus>> {
        self.guests.as_ref()
    }

    /// Status of a single guest, if they are on the guest list
    pub fn guest_status(&self, user_id: &str) -> Option<GuestStatus> {
        self.guests.as_ref()?.get(user_id).copied()
    }

    pub fn guest_count(&self) -> usize {
        self.guests.as_ref().map_or(0, HashMap::len)
    }

    /// User IDs of guests with the given status
    pub fn with_status(&self, status: GuestStatus) -> impl Iterator<Item = &str> + '_ {
        self.guests
            .iter()
            .flat_map(|guests| guests.iter())
            .filter(move |(_, s)| **s == status)
            .map(|(id, _)| id.as_str())
    }

    /// User IDs who will take part in the plan
    pub fn going(&self) -> impl Iterator<Item = &str> + '_ {
        self.with_status(GuestStatus::Going)
    }

    /// User IDs who won't take part in the plan
    pub fn declined(&self) -> impl Iterator<Item = &str> + '_ {
        self.with_status(GuestStatus::Declined)
    }

    /// User IDs who are invited but haven't answered
    pub fn invited(&self) -> impl Iterator<Item = &str> + '_ {
        self.with_status(GuestStatus::Invited)
    }
}
