//! Extension name sets.

use std::ffi::{CStr, CString, c_char};

use ash::vk;

use crate::errors::{BootError, Result};

/// Name of an extension as reported by the driver.
///
/// Returns `None` if the name array holds no terminator.
#[must_use]
pub fn extension_name(props: &vk::ExtensionProperties) -> Option<&CStr> {
    props.extension_name_as_c_str().ok()
}

/// An ordered, de-duplicated set of extension (or layer) names.
///
/// Used both to describe what a driver offers and what was enabled on an
/// instance or device; the loader consults the latter to decide whether an
/// extension-gated entry point is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    names: Vec<CString>,
}

impl ExtensionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from UTF-8 names.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            let name = CString::new(name.as_ref()).map_err(BootError::InvalidName)?;
            set.insert(name);
        }
        Ok(set)
    }

    /// Builds a set from driver-reported extension properties.
    ///
    /// Entries without a terminator are skipped.
    #[must_use]
    pub fn from_properties(properties: &[vk::ExtensionProperties]) -> Self {
        let mut set = Self::new();
        for name in properties.iter().filter_map(extension_name) {
            set.insert(name.to_owned());
        }
        set
    }

    /// Inserts `name`, returning `false` if it was already present.
    pub fn insert(&mut self, name: CString) -> bool {
        if self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.as_bytes() == name.as_bytes())
    }

    /// First name of `self` that `available` does not contain.
    #[must_use]
    pub fn first_missing_from(&self, available: &ExtensionSet) -> Option<&CStr> {
        self.names
            .iter()
            .find(|name| !available.names.contains(name))
            .map(CString::as_c_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CStr> {
        self.names.iter().map(CString::as_c_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Raw pointers for `pp_enabled_*_names`. Valid while `self` is alive.
    #[must_use]
    pub fn as_ptrs(&self) -> Vec<*const c_char> {
        self.names.iter().map(|name| name.as_ptr()).collect()
    }
}
