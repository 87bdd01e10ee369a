//! Name registry for quantizer serialization and lookup.
//!
//! The registry is an explicit map built at startup and passed around by
//! the caller; there is no global mutable state. Identifiers are a tagged
//! variant ([`QuantizerId`]): either a registered name or an already
//! resolved quantizer.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{QuantizeError, Result};
use crate::quantizer::{ApproxSign, Quantizer, SteSign, SteTern};

/// Serialize a quantizer to its registry identifier.
#[must_use]
pub fn serialize(quantizer: &dyn Quantizer) -> &'static str {
    quantizer.name()
}

/// A quantizer identifier: a name to resolve, or a resolved quantizer.
///
/// Absence is expressed as `Option::<QuantizerId>::None` at the [`get`]
/// call site, so the three cases (absent, name, function) are checked
/// exhaustively.
///
/// [`get`]: QuantizerRegistry::get
#[derive(Clone)]
pub enum QuantizerId {
    /// A human-readable name, resolved through the registry.
    Name(String),
    /// An already resolved quantizer, returned unchanged.
    Function(Arc<dyn Quantizer>),
}

impl std::fmt::Debug for QuantizerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Function(q) => f.debug_tuple("Function").field(&q.name()).finish(),
        }
    }
}

impl From<&str> for QuantizerId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for QuantizerId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Arc<dyn Quantizer>> for QuantizerId {
    fn from(quantizer: Arc<dyn Quantizer>) -> Self {
        Self::Function(quantizer)
    }
}

/// Explicit name-to-quantizer map.
///
/// Built once at startup (usually via [`QuantizerRegistry::with_builtins`])
/// and immutable afterwards; shareable across threads.
pub struct QuantizerRegistry {
    entries: HashMap<String, Arc<dyn Quantizer>>,
}

impl QuantizerRegistry {
    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A registry populated with the built-in quantizers:
    /// `ste_sign`, `approx_sign` and `ste_tern`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(SteSign::new()));
        registry.register(Arc::new(ApproxSign::new()));
        registry.register(Arc::new(SteTern::new()));
        registry
    }

    /// Register a quantizer under its own name, replacing any previous
    /// entry with the same name.
    pub fn register(&mut self, quantizer: Arc<dyn Quantizer>) {
        let name = quantizer.name();
        debug!(name, "registered quantizer");
        self.entries.insert(name.to_string(), quantizer);
    }

    /// Resolve a name to a registered quantizer.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::UnknownQuantizer`] if the name is not
    /// registered.
    pub fn deserialize(&self, name: &str) -> Result<Arc<dyn Quantizer>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| QuantizeError::UnknownQuantizer(name.to_string()))
    }

    /// Resolve an optional identifier to an optional quantizer.
    ///
    /// `None` maps to `None`; a [`QuantizerId::Name`] is resolved through
    /// the registry; a [`QuantizerId::Function`] is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::UnknownQuantizer`] for an unresolvable
    /// name.
    pub fn get(&self, identifier: Option<QuantizerId>) -> Result<Option<Arc<dyn Quantizer>>> {
        match identifier {
            None => Ok(None),
            Some(QuantizerId::Name(name)) => Ok(Some(self.deserialize(&name)?)),
            Some(QuantizerId::Function(quantizer)) => Ok(Some(quantizer)),
        }
    }

    /// Names of all registered quantizers, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for QuantizerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for QuantizerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuantizerRegistry")
            .field("names", &self.names())
            .finish()
    }
}
