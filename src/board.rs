use crate::api::{decode_component, ActivityApi, ApiError};
use crate::model::{build_cards, ActivityCard};
use crate::notice::Notice;

pub const LOAD_FAILURE: &str = "Failed to load activities. Please try again later.";
pub const SIGNUP_FAILURE: &str = "Failed to sign up. Please try again.";
pub const REMOVE_FAILURE: &str = "Failed to remove participant. Please try again.";

/// The page regions the board writes to, plus the blocking confirm prompt.
pub trait BoardSurface {
    fn show_cards(&self, cards: Vec<ActivityCard>);
    fn show_load_failure(&self);
    fn set_activity_options(&self, names: Vec<String>);
    /// Email and activity exactly as the form controls currently hold them.
    fn signup_fields(&self) -> (String, String);
    fn reset_form(&self);
    fn show_notice(&self, notice: Notice);
    fn confirm(&self, prompt: &str) -> bool;
}

/// How a user action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ActivityBoard<A, S> {
    api: A,
    surface: S,
}

impl<A: ActivityApi, S: BoardSurface> ActivityBoard<A, S> {
    pub fn new(api: A, surface: S) -> Self {
        Self { api, surface }
    }

    pub async fn load_and_render(&self) -> Outcome {
        match self.api.list_activities().await {
            Ok(activities) => {
                log::debug!("loaded {} activities", activities.len());
                self.surface.set_activity_options(activities.names());
                self.surface.show_cards(build_cards(&activities));
                Outcome::Applied
            }
            Err(err) => {
                log::error!("error fetching activities: {err}");
                self.surface.show_load_failure();
                Outcome::Failed
            }
        }
    }

    /// Resync after a successful mutation.
    pub async fn refresh(&self) -> Outcome {
        self.load_and_render().await
    }

    /// Click on a roster entry's removal control. Takes the encoded keys the
    /// control carries.
    pub async fn remove_participant(&self, activity_key: &str, email_key: &str) -> Outcome {
        let (activity, email) = match decode_target(activity_key, email_key) {
            Ok(target) => target,
            Err(err) => {
                log::warn!("ignoring removal control with bad keys: {err}");
                self.surface.show_notice(Notice::error(REMOVE_FAILURE));
                return Outcome::Failed;
            }
        };

        if !self
            .surface
            .confirm(&format!("Remove {email} from {activity}?"))
        {
            return Outcome::Cancelled;
        }

        match self.api.unregister(&activity, &email).await {
            Ok(reply) => {
                self.surface.show_notice(Notice::from_reply(&reply));
                if reply.ok() {
                    self.refresh().await;
                    Outcome::Applied
                } else {
                    Outcome::Rejected
                }
            }
            Err(err) => {
                log::error!("error removing participant: {err}");
                self.surface.show_notice(Notice::error(REMOVE_FAILURE));
                Outcome::Failed
            }
        }
    }

    /// Sign-up form submit. The caller has already suppressed navigation.
    pub async fn submit_signup(&self) -> Outcome {
        let (email, activity) = self.surface.signup_fields();
        self.handle_signup(&email, &activity).await
    }

    pub async fn handle_signup(&self, email: &str, activity: &str) -> Outcome {
        match self.api.signup(activity, email).await {
            Ok(reply) => {
                self.surface.show_notice(Notice::from_reply(&reply));
                if reply.ok() {
                    self.surface.reset_form();
                    self.refresh().await;
                    Outcome::Applied
                } else {
                    Outcome::Rejected
                }
            }
            Err(err) => {
                log::error!("error signing up: {err}");
                self.surface.show_notice(Notice::error(SIGNUP_FAILURE));
                Outcome::Failed
            }
        }
    }
}

fn decode_target(activity_key: &str, email_key: &str) -> Result<(String, String), ApiError> {
    Ok((decode_component(activity_key)?, decode_component(email_key)?))
}
