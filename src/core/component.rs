//! Type-erased component identity
//!
//! A [`ComponentId`] names "value N of taxonomy T" without the logger knowing
//! the concrete enumeration behind T. Statically typed callers get a native tag
//! derived from the enum's [`TypeId`]; dynamically typed callers (bindings,
//! plugins) supply a taxonomy name, optionally qualified by its module.
//!
//! Identical integer values from different taxonomies never compare equal.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Which taxonomy a component value belongs to.
///
/// Ordering puts every native tag before every named tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentTag {
    /// Process-local type identity of a Rust enum
    Native { id: TypeId, name: &'static str },
    /// Taxonomy name supplied by a dynamically typed caller
    Named(Arc<str>),
}

impl ComponentTag {
    pub fn of<T: 'static>() -> Self {
        ComponentTag::Native {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn named(name: impl Into<Arc<str>>) -> Self {
        ComponentTag::Named(name.into())
    }

    /// Short name used for display. Native tags drop their module path.
    pub fn display_name(&self) -> &str {
        match self {
            ComponentTag::Native { name, .. } => {
                let name: &str = name;
                let base = name.split('<').next().unwrap_or(name);
                base.rsplit("::").next().unwrap_or(base)
            }
            ComponentTag::Named(name) => &**name,
        }
    }
}

/// A component value tagged with its taxonomy.
///
/// Orders by tag first, then by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId {
    tag: ComponentTag,
    value: u32,
}

impl ComponentId {
    pub fn new(tag: ComponentTag, value: u32) -> Self {
        Self { tag, value }
    }

    /// Value `value` of the Rust type `T`
    pub fn native<T: 'static>(value: u32) -> Self {
        Self::new(ComponentTag::of::<T>(), value)
    }

    /// Value `value` of the taxonomy called `name`
    pub fn named(name: impl Into<Arc<str>>, value: u32) -> Self {
        Self::new(ComponentTag::named(name), value)
    }

    /// Named taxonomy qualified by its defining module, rendered `module.name`
    pub fn qualified(module: &str, name: &str, value: u32) -> Self {
        Self::named(format!("{}.{}", module, name), value)
    }

    pub fn tag(&self) -> &ComponentTag {
        &self.tag
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Map back to a concrete enum.
    ///
    /// Falls back to [`Resolved::Raw`] when the tag is not `E`'s native tag
    /// (including every named tag) or the value has no matching variant.
    pub fn resolve<E>(&self) -> Resolved<E>
    where
        E: Component + TryFrom<u32>,
    {
        if let ComponentTag::Native { id, .. } = &self.tag {
            if *id == TypeId::of::<E>() {
                if let Ok(variant) = E::try_from(self.value) {
                    return Resolved::Known(variant);
                }
            }
        }
        Resolved::Raw(self.value)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.tag.display_name(), self.value)
    }
}

/// Result of [`ComponentId::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<E> {
    Known(E),
    Raw(u32),
}

/// A fieldless enum usable as a component taxonomy.
///
/// Usually implemented through [`impl_component!`](crate::impl_component).
pub trait Component: Copy + 'static {
    fn value(self) -> u32;

    fn component_id(self) -> ComponentId {
        ComponentId::native::<Self>(self.value())
    }
}
