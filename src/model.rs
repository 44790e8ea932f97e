use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::api::encode_component;

/// One activity as served by `GET /activities`. The name is the map key on
/// the wire, so it is filled in after the body is decoded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Activity {
    #[serde(skip)]
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn spots_left(&self) -> i64 {
        self.max_participants - self.participants.len() as i64
    }
}

/// The activity snapshot in server key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activities(Vec<Activity>);

impl Activities {
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|a| a.name.clone()).collect()
    }
}

impl FromIterator<Activity> for Activities {
    fn from_iter<I: IntoIterator<Item = Activity>>(iter: I) -> Self {
        Activities(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Activities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // serde_json's preserve_order keeps the object in server order.
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(name, value)| -> Result<Activity, D::Error> {
                let mut activity: Activity =
                    serde_json::from_value(value).map_err(<D::Error as serde::de::Error>::custom)?;
                activity.name = name;
                Ok(activity)
            })
            .collect()
    }
}

/// Body of a sign-up or unregister reply. Success carries `message`,
/// failures carry `detail`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// A participant row with its removal control. The keys are the
/// percent-encoded values stored on the control.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub email: String,
    pub activity_key: String,
    pub email_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub roster: Vec<RosterEntry>,
}

impl ActivityCard {
    pub fn from_activity(activity: &Activity) -> Self {
        let activity_key = encode_component(&activity.name);
        let roster = activity
            .participants
            .iter()
            .map(|email| RosterEntry {
                email: email.clone(),
                activity_key: activity_key.clone(),
                email_key: encode_component(email),
            })
            .collect();

        Self {
            name: activity.name.clone(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.spots_left(),
            roster,
        }
    }

    pub fn availability_label(&self) -> String {
        format!("{} spots left", self.spots_left)
    }
}

pub fn build_cards(activities: &Activities) -> Vec<ActivityCard> {
    activities.iter().map(ActivityCard::from_activity).collect()
}
