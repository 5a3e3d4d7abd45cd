//! Handler registry and resolver.
//!
//! Handlers are registered under a dotted identifier and looked up again by
//! the same string. Crates that ship handlers submit a [`HandlerRegistration`]
//! with `inventory::submit!`; [`HandlerRegistry::from_inventory`] collects
//! every such registration linked into the binary. This stands in for loading
//! code by name at runtime: the set of handlers is fixed at compile time and
//! the configuration string only selects among them.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{HandlerResolutionError, RegistryError, ResolveCause};
use crate::handler::{HandlerKind, SharedHandler};
use crate::identifier::HandlerPath;

/// Static registration entry for a handler.
///
/// This struct is submitted to `inventory` for automatic collection.
pub struct HandlerRegistration {
    /// Full dotted identifier, e.g. `function.handler.handle`.
    pub identifier: &'static str,
    /// Builds the handler when the registry is assembled.
    pub factory: fn() -> SharedHandler,
}

impl HandlerRegistration {
    pub const fn new(identifier: &'static str, factory: fn() -> SharedHandler) -> Self {
        HandlerRegistration {
            identifier,
            factory,
        }
    }
}

inventory::collect!(HandlerRegistration);

/// Registry of handlers keyed by module path, then symbol.
///
/// Modules and symbols keep their registration order.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    modules: IndexMap<String, IndexMap<String, SharedHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from every [`HandlerRegistration`] linked into the
    /// binary, registered in identifier order.
    ///
    /// Returns [`RegistryError::Duplicate`] if two registrations share an
    /// identifier.
    pub fn from_inventory() -> Result<Self, RegistryError> {
        let mut registrations: Vec<&HandlerRegistration> =
            inventory::iter::<HandlerRegistration>().collect();
        registrations.sort_by_key(|reg| reg.identifier);

        let mut registry = HandlerRegistry::new();
        for reg in registrations {
            registry.register(reg.identifier, (reg.factory)())?;
        }
        Ok(registry)
    }

    /// Registers `handler` under `identifier`.
    pub fn register(&mut self, identifier: &str, handler: SharedHandler) -> Result<(), RegistryError> {
        let path = HandlerPath::parse(identifier).map_err(|_| RegistryError::Malformed {
            identifier: identifier.to_string(),
        })?;

        let symbols = self.modules.entry(path.module().to_string()).or_default();
        if symbols.contains_key(path.symbol()) {
            return Err(RegistryError::Duplicate {
                identifier: identifier.to_string(),
            });
        }
        symbols.insert(path.symbol().to_string(), handler);
        Ok(())
    }

    /// Resolves a configuration string to its handler.
    ///
    /// The identifier is split on its last `.`; the module path is looked up
    /// first, then the symbol inside it. Every failure carries the identifier
    /// as given.
    pub fn resolve(&self, identifier: &str) -> Result<SharedHandler, HandlerResolutionError> {
        let path = HandlerPath::parse(identifier)
            .map_err(|cause| HandlerResolutionError::new(identifier, cause))?;

        let symbols = self.modules.get(path.module()).ok_or_else(|| {
            HandlerResolutionError::new(
                identifier,
                ResolveCause::ModuleNotFound {
                    module: path.module().to_string(),
                },
            )
        })?;

        symbols.get(path.symbol()).cloned().ok_or_else(|| {
            HandlerResolutionError::new(
                identifier,
                ResolveCause::SymbolNotFound {
                    module: path.module().to_string(),
                    symbol: path.symbol().to_string(),
                },
            )
        })
    }

    /// Returns `true` if `identifier` resolves.
    pub fn contains(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_ok()
    }

    /// Lists every registered identifier with its calling convention.
    pub fn identifiers(&self) -> Vec<(String, HandlerKind)> {
        self.modules
            .iter()
            .flat_map(|(module, symbols)| {
                symbols
                    .iter()
                    .map(move |(symbol, handler)| (format!("{}.{}", module, symbol), handler.kind()))
            })
            .collect()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.modules.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}
