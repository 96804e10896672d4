use crate::envelope::Encoded;
use crate::error::MappingResult;
use crate::id::RemoteId;
use crate::inflect;
use crate::mapping::Mapping;
use serde_json::Value;

/// The contract a type implements to synchronize with a remote resource.
///
/// Implementations are explicit — there is no reflection. A model names
/// itself, declares its [`Mapping`], and encodes/decodes each declared
/// property. Association policy (nested attributes vs. foreign key) lives in
/// the mapping, not in the encode hooks, so flipping a property between the
/// two never touches model code.
///
/// Only [`model_name`](Self::model_name), [`mapping`](Self::mapping), the id
/// accessors, and the encode/decode hooks are required; the rest have
/// defaults that match Rails conventions.
pub trait RemoteModel: Default {
    /// The equivalent name of this type on the server, e.g. `"post"`.
    fn model_name() -> &'static str;

    /// The name of this type's controller — where its requests route.
    /// Defaults to the pluralized model name; override for irregular
    /// plurals (`person` → `people`).
    fn controller_name() -> String {
        inflect::pluralize(Self::model_name())
    }

    /// The remote mapping declaration for this type.
    fn mapping() -> Mapping;

    /// The server-assigned identity, if this object has been persisted.
    fn remote_id(&self) -> Option<RemoteId>;

    /// Sets or clears the server-assigned identity.
    fn set_remote_id(&mut self, id: Option<RemoteId>);

    /// When true and this object is sent as a nested record, a
    /// `"_destroy": true` marker is included so the server destroys the row
    /// (requires `allow_destroy` on the receiving nested-attributes writer).
    fn destroy_on_nesting(&self) -> bool {
        false
    }

    /// Opts an embedded association back into serialization when this object
    /// is itself nested. By default nested records are shallow — their own
    /// embedded associations are skipped to keep recursion bounded.
    fn include_when_nested(&self, property: &str) -> bool {
        let _ = property;
        false
    }

    /// Returns the remote representation for one declared property, or
    /// `Ok(None)` to leave the key out of the outgoing envelope entirely
    /// (e.g. server-managed timestamps).
    fn encode_property(&self, property: &str) -> MappingResult<Option<Encoded>>;

    /// Sets one declared property from its remote representation. Unknown
    /// property names should be ignored.
    fn decode_property(&mut self, property: &str, value: &Value) -> MappingResult<()>;
}
