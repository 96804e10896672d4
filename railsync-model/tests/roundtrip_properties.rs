//! Property-based tests for the envelope codec.
//!
//! The contract under test: feeding an object's own outgoing envelope back
//! through the inbound path is the identity (a no-op server changes nothing),
//! and the timestamp wire format round-trips losslessly.

mod common;

use chrono::{DateTime, TimeZone, Utc};
use common::{Post, Response};
use proptest::prelude::*;
use railsync_model::{apply, envelope, RemoteId};
use serde_json::json;

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 .,!?']{0,80}").unwrap()
}

fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    // 1970..≈2065, with optional subsecond precision.
    (0i64..3_000_000_000, prop::option::of(0u32..1_000_000_000))
        .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos.unwrap_or(0)).unwrap())
}

proptest! {
    /// serialize → apply onto the same object changes nothing.
    #[test]
    fn echoed_envelope_is_identity(
        author in text_strategy(),
        content in text_strategy(),
        response_author in text_strategy(),
        response_content in text_strategy(),
        persisted in any::<bool>(),
    ) {
        let mut post = Post {
            author,
            content,
            ..Default::default()
        };
        post.responses.push(Response {
            id: persisted.then(|| RemoteId::new(42)),
            author: response_author,
            content: response_content,
            ..Default::default()
        });

        let before = post.clone();
        let echoed = envelope(&post).unwrap().into_value();
        apply(&mut post, &echoed).unwrap();
        prop_assert_eq!(post, before);
    }

    /// The wire format parses back to the exact timestamp, at any precision.
    #[test]
    fn timestamp_wire_format_is_lossless(ts in timestamp_strategy()) {
        let mut post = Post::default();
        post.created_at = Some(ts);

        // created_at is never sent, so push it through the inbound path the
        // way a server response would carry it.
        let wire = ts.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true);
        let mut fresh = Post::default();
        apply(&mut fresh, &json!({"created_at": wire})).unwrap();
        prop_assert_eq!(fresh.created_at, Some(ts));
    }

    /// Applying the same response twice is idempotent.
    #[test]
    fn apply_is_idempotent(
        author in text_strategy(),
        content in text_strategy(),
    ) {
        let body = json!({
            "id": 7,
            "author": author,
            "content": content,
            "responses": [
                {"id": 1, "author": "a", "content": "x"},
                {"id": 2, "author": "b", "content": "y"}
            ]
        });
        let mut post = Post::default();
        apply(&mut post, &body).unwrap();
        let once = post.clone();
        apply(&mut post, &body).unwrap();
        prop_assert_eq!(post, once);
    }
}
