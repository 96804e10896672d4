use crate::error::{MappingError, MappingResult};

/// Hint for scalar properties whose wire representation is not the local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    /// Encoded as an RFC 3339 UTC string on the wire.
    DateTime,
}

/// How an association is written into an outgoing envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestingPolicy {
    /// Full nested attributes under `<key>_attributes`. The Rails side must
    /// accept nested attributes for the association.
    Embed,
    /// Foreign key only, under `<key>_id` (`<key>_ids` for to-many). The
    /// correct choice depends on which side of the relation holds the key on
    /// the server, not on local multiplicity — hence the per-property
    /// override on [`Property`].
    ReferenceById,
}

/// The declared kind of a mapped property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// A plain value copied under the remote key.
    Scalar { hint: Option<TypeHint> },
    /// An associated object or collection of objects.
    Association {
        to_many: bool,
        policy: NestingPolicy,
    },
}

/// One entry in a type's remote mapping: a local property name, the remote
/// key it corresponds to (defaults to the local name), and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub remote_key: String,
    pub kind: PropertyKind,
}

impl Property {
    fn new(name: &str, kind: PropertyKind) -> Self {
        Self {
            name: name.to_string(),
            remote_key: name.to_string(),
            kind,
        }
    }

    /// A plain scalar property.
    pub fn scalar(name: &str) -> Self {
        Self::new(name, PropertyKind::Scalar { hint: None })
    }

    /// A scalar timestamp property (RFC 3339 on the wire).
    pub fn datetime(name: &str) -> Self {
        Self::new(
            name,
            PropertyKind::Scalar {
                hint: Some(TypeHint::DateTime),
            },
        )
    }

    /// A to-many association, embedded as nested attributes.
    pub fn has_many(name: &str) -> Self {
        Self::new(
            name,
            PropertyKind::Association {
                to_many: true,
                policy: NestingPolicy::Embed,
            },
        )
    }

    /// A to-one association, embedded as nested attributes.
    pub fn has_one(name: &str) -> Self {
        Self::new(
            name,
            PropertyKind::Association {
                to_many: false,
                policy: NestingPolicy::Embed,
            },
        )
    }

    /// A to-one association sent as a foreign key only. The remote model
    /// holds the key, so sending `<key>_attributes` would be rejected.
    pub fn belongs_to(name: &str) -> Self {
        Self::new(
            name,
            PropertyKind::Association {
                to_many: false,
                policy: NestingPolicy::ReferenceById,
            },
        )
    }

    /// Overrides the remote key (defaults to the local name).
    pub fn with_remote_key(mut self, key: &str) -> Self {
        self.remote_key = key.to_string();
        self
    }

    /// Forces the embed policy on an association, regardless of how it was
    /// constructed. No effect on scalars.
    pub fn embedded(mut self) -> Self {
        if let PropertyKind::Association { to_many, .. } = self.kind {
            self.kind = PropertyKind::Association {
                to_many,
                policy: NestingPolicy::Embed,
            };
        }
        self
    }

    /// Forces the reference-by-id policy on an association. No effect on
    /// scalars.
    pub fn reference_by_id(mut self) -> Self {
        if let PropertyKind::Association { to_many, .. } = self.kind {
            self.kind = PropertyKind::Association {
                to_many,
                policy: NestingPolicy::ReferenceById,
            };
        }
        self
    }

    /// Whether this property is an association.
    #[must_use]
    pub fn is_association(&self) -> bool {
        matches!(self.kind, PropertyKind::Association { .. })
    }

    /// Whether this property is an embedded association.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(
            self.kind,
            PropertyKind::Association {
                policy: NestingPolicy::Embed,
                ..
            }
        )
    }

    /// The key this property is written under in an outgoing envelope:
    /// the remote key itself for scalars, `<key>_attributes` for embedded
    /// associations, `<key>_id` / `<key>_ids` for references.
    #[must_use]
    pub fn outbound_key(&self) -> String {
        match self.kind {
            PropertyKind::Scalar { .. } => self.remote_key.clone(),
            PropertyKind::Association {
                policy: NestingPolicy::Embed,
                ..
            } => format!("{}_attributes", self.remote_key),
            PropertyKind::Association {
                to_many: false,
                policy: NestingPolicy::ReferenceById,
            } => format!("{}_id", self.remote_key),
            PropertyKind::Association {
                to_many: true,
                policy: NestingPolicy::ReferenceById,
            } => format!("{}_ids", self.remote_key),
        }
    }
}

/// An ordered list of [`Property`] declarations for one remote type.
///
/// Built by explicit composition: a "subclass" mapping starts from
/// [`Mapping::extending`] with its ancestor's mapping and appends its own
/// entries, ancestor-first. Duplicate local names are permitted; lookups
/// ([`property`](Self::property), [`property_for_remote_key`](Self::property_for_remote_key))
/// are last-declared-wins, while serialization emits every entry in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    properties: Vec<Property>,
}

impl Mapping {
    /// An empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a mapping from an ancestor's declarations.
    #[must_use]
    pub fn extending(parent: Mapping) -> Self {
        parent
    }

    /// Appends a property declaration (builder form).
    #[must_use]
    pub fn with(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Appends a property declaration.
    pub fn push(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// All declarations, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Looks up a declaration by local name (last-declared-wins).
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().rev().find(|p| p.name == name)
    }

    /// Reverse lookup from a remote key to its declaration
    /// (last-declared-wins).
    ///
    /// Matches the base remote key (the form responses and validation errors
    /// use), and additionally the `<key>_attributes` form for embedded
    /// associations so that an echoed outgoing envelope applies cleanly.
    /// `<key>_id` foreign keys are deliberately not matched: a bare id cannot
    /// reconstruct an associated object.
    #[must_use]
    pub fn property_for_remote_key(&self, key: &str) -> Option<&Property> {
        self.properties.iter().rev().find(|p| {
            p.remote_key == key
                || (p.is_embedded() && key == format!("{}_attributes", p.remote_key))
        })
    }

    /// Checks the declarations for programmer errors: empty or whitespace
    /// names, and distinct properties whose outbound keys collide with
    /// different kinds. Invoked automatically when an envelope is built.
    pub fn validate(&self) -> MappingResult<()> {
        for property in &self.properties {
            if property.name.trim().is_empty() || property.name.contains(char::is_whitespace) {
                return Err(MappingError::InvalidPropertyName(property.name.clone()));
            }
        }
        for (i, a) in self.properties.iter().enumerate() {
            for b in &self.properties[i + 1..] {
                if a.name != b.name && a.outbound_key() == b.outbound_key() && a.kind != b.kind {
                    return Err(MappingError::ConflictingRemoteKey {
                        key: a.outbound_key(),
                        first: a.name.clone(),
                        second: b.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
