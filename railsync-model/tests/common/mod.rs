//! Shared fixture models mirroring the reference board domain:
//! `Post` has-many `Response`, `Person`/`Brain`/`Thought` for deep nesting.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use railsync_model::{
    decode, merge_many, merge_one, Encoded, Mapping, MappingResult, Property, RemoteId,
    RemoteModel,
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
            // Server-managed; decoded but never sent.
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
    pub post: Option<Box<Post>>,
    pub pending_removal: bool,
    /// Never mapped; client-side only.
    pub local_note: String,
}

impl RemoteModel for Response {
    fn model_name() -> &'static str {
        "response"
    }

    fn mapping() -> Mapping {
        Mapping::new()
            .with(Property::scalar("author"))
            .with(Property::scalar("content"))
            .with(Property::belongs_to("post"))
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
            "post" => Some(Encoded::one(self.post.as_deref())?),
            _ => None,
        })
    }

    fn decode_property(&mut self, property: &str, value: &Value) -> MappingResult<()> {
        match property {
            "author" => self.author = decode::string(property, value)?,
            "content" => self.content = decode::string(property, value)?,
            "post" => {
                let mut slot: Option<Post> = self.post.take().map(|post| *post);
                merge_one(&mut slot, value)?;
                self.post = slot.map(Box::new);
            }
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub id: Option<RemoteId>,
    pub name: String,
    pub brain: Option<Brain>,
}

impl RemoteModel for Person {
    fn model_name() -> &'static str {
        "person"
    }

    fn controller_name() -> String {
        "people".to_string()
    }

    fn mapping() -> Mapping {
        Mapping::new()
            .with(Property::scalar("name"))
            .with(Property::has_one("brain"))
    }

    fn remote_id(&self) -> Option<RemoteId> {
        self.id
    }

    fn set_remote_id(&mut self, id: Option<RemoteId>) {
        self.id = id;
    }

    fn encode_property(&self, property: &str) -> MappingResult<Option<Encoded>> {
        Ok(match property {
            "name" => Some(Encoded::value(self.name.as_str())),
            "brain" => Some(Encoded::one(self.brain.as_ref())?),
            _ => None,
        })
    }

    fn decode_property(&mut self, property: &str, value: &Value) -> MappingResult<()> {
        match property {
            "name" => self.name = decode::string(property, value)?,
            "brain" => merge_one(&mut self.brain, value)?,
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Brain {
    pub id: Option<RemoteId>,
    pub thoughts: Vec<Thought>,
}

impl RemoteModel for Brain {
    fn model_name() -> &'static str {
        "brain"
    }

    fn mapping() -> Mapping {
        Mapping::new().with(Property::has_many("thoughts"))
    }

    fn remote_id(&self) -> Option<RemoteId> {
        self.id
    }

    fn set_remote_id(&mut self, id: Option<RemoteId>) {
        self.id = id;
    }

    fn include_when_nested(&self, property: &str) -> bool {
        // person -> brain_attributes -> thoughts_attributes
        property == "thoughts"
    }

    fn encode_property(&self, property: &str) -> MappingResult<Option<Encoded>> {
        Ok(match property {
            "thoughts" => Some(Encoded::many(&self.thoughts)?),
            _ => None,
        })
    }

    fn decode_property(&mut self, property: &str, value: &Value) -> MappingResult<()> {
        if property == "thoughts" {
            merge_many(&mut self.thoughts, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Thought {
    pub id: Option<RemoteId>,
    pub content: String,
    pub pending_removal: bool,
}

impl RemoteModel for Thought {
    fn model_name() -> &'static str {
        "thought"
    }

    fn mapping() -> Mapping {
        Mapping::new().with(Property::scalar("content"))
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
            "content" => Some(Encoded::value(self.content.as_str())),
            _ => None,
        })
    }

    fn decode_property(&mut self, property: &str, value: &Value) -> MappingResult<()> {
        if property == "content" {
            self.content = decode::string(property, value)?;
        }
        Ok(())
    }
}
