use serde::{Deserialize, Serialize};

use super::{Contact, Event, Neighborhood, News, Notification, Resident};
use crate::authz::{ResourceKind, ScopedRecord};

/// Any stored community record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Neighborhood(Neighborhood),
    /// Resident or admin account; see [`Record::kind`]
    Resident(Resident),
    News(News),
    Event(Event),
    Contact(Contact),
    Notification(Notification),
}

impl Record {
    /// The resource kind this record is authorized as.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Neighborhood(_) => ResourceKind::Neighborhood,
            Self::Resident(r) if r.is_admin_account() => ResourceKind::Admin,
            Self::Resident(_) => ResourceKind::Resident,
            Self::News(_) => ResourceKind::News,
            Self::Event(_) => ResourceKind::Event,
            Self::Contact(_) => ResourceKind::Contact,
            Self::Notification(_) => ResourceKind::Notification,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Neighborhood(n) => n.id,
            Self::Resident(r) => r.id,
            Self::News(n) => n.id,
            Self::Event(e) => e.id,
            Self::Contact(c) => c.id,
            Self::Notification(n) => n.id,
        }
    }
}

impl ScopedRecord for Record {
    fn neighborhood_id(&self) -> Option<i64> {
        match self {
            Self::Neighborhood(n) => Some(n.id),
            Self::Resident(r) => r.neighborhood_id,
            Self::News(n) => Some(n.neighborhood_id),
            Self::Event(e) => Some(e.neighborhood_id),
            Self::Contact(_) => None,
            Self::Notification(n) => Some(n.neighborhood_id),
        }
    }

    fn owner_id(&self) -> Option<i64> {
        match self {
            Self::Neighborhood(_) => None,
            Self::Resident(r) => Some(r.id),
            Self::News(n) => Some(n.resident_id),
            Self::Event(e) => Some(e.resident_id),
            Self::Contact(c) => c.resident_id,
            Self::Notification(n) => Some(n.resident_id),
        }
    }
}

macro_rules! impl_from_model {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Record {
                fn from(model: $variant) -> Self {
                    Self::$variant(model)
                }
            }
        )*
    };
}

impl_from_model!(Neighborhood, Resident, News, Event, Contact, Notification);
