use std::borrow::Cow;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use thiserror::Error;

use crate::model::{Activities, ApiMessage};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// A response arrived but its body was not the JSON we expect.
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("could not decode {0:?}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Malformed(e.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

pub fn decode_component(encoded: &str) -> Result<String, ApiError> {
    urlencoding::decode(encoded)
        .map(Cow::into_owned)
        .map_err(|_| ApiError::Decode(encoded.to_string()))
}

/// URL builder for the three backend calls. Path and query values are
/// percent-encoded here and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn activities(&self) -> String {
        format!("{}/activities", self.base)
    }

    pub fn signup(&self, activity: &str, email: &str) -> String {
        self.mutation(activity, "signup", email)
    }

    pub fn unregister(&self, activity: &str, email: &str) -> String {
        self.mutation(activity, "unregister", email)
    }

    fn mutation(&self, activity: &str, verb: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/{}?email={}",
            self.base,
            encode_component(activity),
            verb,
            encode_component(email)
        )
    }
}

/// A sign-up or unregister reply. Non-2xx is not an error here: the body
/// still carries the `detail` to show. A body that isn't JSON is, whatever
/// the status.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationReply {
    pub status: u16,
    pub body: ApiMessage,
}

impl MutationReply {
    pub fn from_parts(status: u16, text: &str) -> Result<Self, ApiError> {
        let body = serde_json::from_str(text)?;
        Ok(Self { status, body })
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait ActivityApi {
    async fn list_activities(&self) -> Result<Activities, ApiError>;

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationReply, ApiError>;

    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationReply, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpActivityApi {
    endpoints: Endpoints,
}

impl HttpActivityApi {
    pub fn new(base: &str) -> Self {
        Self {
            endpoints: Endpoints::new(base),
        }
    }
}

async fn read_reply(resp: Response) -> Result<MutationReply, ApiError> {
    let status = resp.status();
    let text = resp.text().await?;
    MutationReply::from_parts(status, &text)
}

#[async_trait(?Send)]
impl ActivityApi for HttpActivityApi {
    async fn list_activities(&self) -> Result<Activities, ApiError> {
        let resp = Request::get(&self.endpoints.activities()).send().await?;
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json::<Activities>().await?)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationReply, ApiError> {
        let url = self.endpoints.signup(activity, email);
        let resp = Request::post(&url).send().await?;
        read_reply(resp).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationReply, ApiError> {
        let url = self.endpoints.unregister(activity, email);
        let resp = Request::delete(&url).send().await?;
        read_reply(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_count_as_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Malformed(_)));
    }

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(ApiError::Status(503).to_string(), "unexpected HTTP status 503");
        assert_eq!(
            ApiError::Transport("offline".into()).to_string(),
            "transport failure: offline"
        );
    }

    #[test]
    fn reserved_characters_are_encoded_in_mutation_urls() {
        let endpoints = Endpoints::new("");
        assert_eq!(
            endpoints.signup("Chess Club", "a+b@x.com"),
            "/activities/Chess%20Club/signup?email=a%2Bb%40x.com"
        );
        assert_eq!(
            endpoints.unregister("Q&A / Debate", "x y@z.org"),
            "/activities/Q%26A%20%2F%20Debate/unregister?email=x%20y%40z.org"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let endpoints = Endpoints::new("https://school.example/api/");
        assert_eq!(endpoints.activities(), "https://school.example/api/activities");
    }

    #[test]
    fn encoded_values_decode_to_the_original() {
        for raw in ["a+b@x.com", "Chess Club", "Ünïcode ☃", "100%"] {
            assert_eq!(decode_component(&encode_component(raw)).unwrap(), raw);
        }
    }

    #[test]
    fn invalid_utf8_escape_fails_to_decode() {
        assert_eq!(
            decode_component("%FF%FE"),
            Err(ApiError::Decode("%FF%FE".to_string()))
        );
    }

    #[test]
    fn success_reply_needs_a_json_body() {
        let reply = MutationReply::from_parts(200, r#"{"message":"Signed up"}"#).unwrap();
        assert!(reply.ok());
        assert_eq!(reply.body.message.as_deref(), Some("Signed up"));

        assert!(matches!(
            MutationReply::from_parts(200, "not json"),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn failure_reply_needs_a_json_body_too() {
        assert!(matches!(
            MutationReply::from_parts(502, "<html>Bad Gateway</html>"),
            Err(ApiError::Malformed(_))
        ));

        let reply = MutationReply::from_parts(404, "{}").unwrap();
        assert!(!reply.ok());
        assert_eq!(reply.body, ApiMessage::default());

        let reply = MutationReply::from_parts(400, r#"{"detail":"Already registered"}"#).unwrap();
        assert_eq!(reply.body.detail.as_deref(), Some("Already registered"));
    }
}
