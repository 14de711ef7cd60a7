// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic names.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

/// A human-readable name used in diagnostics and error messages.
///
/// Names are phrased to sit in the middle of a sentence (`"this property"`,
/// `"task ':app:compile' property 'destination'"`). Use
/// [`capitalized`](Self::capitalized) when the name starts a sentence.
///
/// # Example
///
/// ```rust
/// use kiln_property::DisplayName;
///
/// let name = DisplayName::new("property 'destination'");
/// assert_eq!(name.as_str(), "property 'destination'");
/// assert_eq!(name.capitalized(), "Property 'destination'");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(Cow<'static, str>);

impl DisplayName {
    /// The name used for a property that has no attached name.
    pub const THIS_PROPERTY: Self = Self::from_static("this property");

    /// The name used in validation messages for a property that has no attached name.
    pub const A_PROPERTY: Self = Self::from_static("a property");

    /// Creates a display name from a static string.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a display name.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the name as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with its first character upper-cased.
    #[must_use]
    pub fn capitalized(&self) -> Cow<'_, str> {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) if !first.is_uppercase() => {
                let mut out = String::with_capacity(self.0.len());
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
                Cow::Owned(out)
            }
            _ => Cow::Borrowed(&self.0),
        }
    }
}

impl From<&'static str> for DisplayName {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for DisplayName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Debug for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DisplayName").field(&self.as_str()).finish()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
