//! Fixture models for client tests: the reference board domain.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use railsync_model::{
    decode, merge_many, Encoded, Mapping, MappingResult, Property, RemoteId, RemoteModel,
};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub id: Option<RemoteId>,
    pub author: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub responses: Vec<Response>,
}

impl RemoteModel for Post {
    fn model_name() -> &'static str {
        "post"
    }

    fn mapping() -> Mapping {
        Mapping::new()
            .with(Property::scalar("author"))
            .with(Property::scalar("content"))
            .with(Property::datetime("created_at"))
            .with(Property::has_many("responses"))
    }

    fn remote_id(&self) -> Option<RemoteId> {
        self.id
    }

    fn set_remote_id(&mut self, id: Option<RemoteId>) {
        self.id = id;
    }

    fn encode_property(&self, property: &str) -> MappingResult<Option<Encoded>> {
        Ok(match property {
            "author" => Some(Encoded::value(self.author.as_str())),
            "content" => Some(Encoded::value(self.content.as_str())),
            "created_at" => None,
            "responses" => Some(Encoded::many(&self.responses)?),
            _ => None,
        })
    }

    fn decode_property(&mut self, property: &str, value: &Value) -> MappingResult<()> {
        match property {
            "author" => self.author = decode::string(property, value)?,
            "content" => self.content = decode::string(property, value)?,
            "created_at" => self.created_at = decode::datetime(property, value)?,
            "responses" => merge_many(&mut self.responses, value)?,
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub id: Option<RemoteId>,
    pub author: String,
    pub content: String,
    pub post_id: Option<i64>,
    pub pending_removal: bool,
}

impl RemoteModel for Response {
    fn model_name() -> &'static str {
        "response"
    }

    fn mapping() -> Mapping {
        Mapping::new()
            .with(Property::scalar("author"))
            .with(Property::scalar("content"))
            .with(Property::scalar("post_id"))
    }

    fn remote_id(&self) -> Option<RemoteId> {
        self.id
    }

    fn set_remote_id(&mut self, id: Option<RemoteId>) {
        self.id = id;
    }

    fn destroy_on_nesting(&self) -> bool {
        self.pending_removal
    }

    fn encode_property(&self, property: &str) -> MappingResult<Option<Encoded>> {
        Ok(match property {
            "author" => Some(Encoded::value(self.author.as_str())),
            "content" => Some(Encoded::value(self.content.as_str())),
            "post_id" => Some(Encoded::value(self.post_id)),
            _ => None,
        })
    }

    fn decode_property(&mut self, property: &str, value: &Value) -> MappingResult<()> {
        match property {
            "author" => self.author = decode::string(property, value)?,
            "content" => self.content = decode::string(property, value)?,
            "post_id" => self.post_id = decode::opt_i64(property, value)?,
            _ => {}
        }
        Ok(())
    }
}
