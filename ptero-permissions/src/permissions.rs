//! # Permissions
//!
//! Resolution and checking of sub-user permission sets.
//! A set is built once from resolvable input and never mutated afterwards;
//! updating permissions means building a new [`Permissions`].

use serde::de::{Deserializer, IgnoredAny};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{PermissionError, PermissionResult};
use crate::flags::Flag;

/// A single entry of permission input: a flag name or a numeric code.
///
/// Names may be given in internal (`CONTROL_CONSOLE`) or external
/// (`control.console`) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionRef {
    /// Numeric flag code.
    Code(u32),
    /// Flag name in either form.
    Name(String),
}

impl From<&str> for PermissionRef {
    fn from(s: &str) -> Self {
        PermissionRef::Name(s.to_string())
    }
}

impl From<String> for PermissionRef {
    fn from(s: String) -> Self {
        PermissionRef::Name(s)
    }
}

impl From<u32> for PermissionRef {
    fn from(code: u32) -> Self {
        PermissionRef::Code(code)
    }
}

impl From<Flag> for PermissionRef {
    fn from(flag: Flag) -> Self {
        PermissionRef::Name(flag.name().to_string())
    }
}

/// Data that can be resolved into a set of flags.
///
/// Valid sources are a list of names, a list of codes, the keys of a map,
/// or a single name or code. An empty or absent source resolves to the
/// empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionResolvable(Vec<PermissionRef>);

impl PermissionResolvable {
    /// Get the raw entries.
    pub fn entries(&self) -> &[PermissionRef] {
        &self.0
    }
}

impl From<Vec<PermissionRef>> for PermissionResolvable {
    fn from(refs: Vec<PermissionRef>) -> Self {
        Self(refs)
    }
}

impl From<&[&str]> for PermissionResolvable {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| PermissionRef::from(*n)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PermissionResolvable {
    fn from(names: [&str; N]) -> Self {
        Self::from(&names[..])
    }
}

impl From<Vec<&str>> for PermissionResolvable {
    fn from(names: Vec<&str>) -> Self {
        Self::from(names.as_slice())
    }
}

impl From<Vec<String>> for PermissionResolvable {
    fn from(names: Vec<String>) -> Self {
        Self(names.into_iter().map(PermissionRef::Name).collect())
    }
}

impl From<&[u32]> for PermissionResolvable {
    fn from(codes: &[u32]) -> Self {
        Self(codes.iter().map(|c| PermissionRef::Code(*c)).collect())
    }
}

impl<const N: usize> From<[u32; N]> for PermissionResolvable {
    fn from(codes: [u32; N]) -> Self {
        Self::from(&codes[..])
    }
}

impl From<Vec<u32>> for PermissionResolvable {
    fn from(codes: Vec<u32>) -> Self {
        Self::from(codes.as_slice())
    }
}

impl From<&[Flag]> for PermissionResolvable {
    fn from(flags: &[Flag]) -> Self {
        Self(flags.iter().map(|f| PermissionRef::from(*f)).collect())
    }
}

impl From<&str> for PermissionResolvable {
    fn from(name: &str) -> Self {
        Self(vec![PermissionRef::from(name)])
    }
}

impl From<String> for PermissionResolvable {
    fn from(name: String) -> Self {
        Self(vec![PermissionRef::Name(name)])
    }
}

impl From<u32> for PermissionResolvable {
    fn from(code: u32) -> Self {
        Self(vec![PermissionRef::Code(code)])
    }
}

impl From<Flag> for PermissionResolvable {
    fn from(flag: Flag) -> Self {
        Self(vec![PermissionRef::from(flag)])
    }
}

impl<V> From<&BTreeMap<String, V>> for PermissionResolvable {
    fn from(map: &BTreeMap<String, V>) -> Self {
        Self(map.keys().cloned().map(PermissionRef::Name).collect())
    }
}

impl<V> From<&HashMap<String, V>> for PermissionResolvable {
    fn from(map: &HashMap<String, V>) -> Self {
        Self(map.keys().cloned().map(PermissionRef::Name).collect())
    }
}

impl From<&Permissions> for PermissionResolvable {
    fn from(perms: &Permissions) -> Self {
        Self(perms.raw.iter().map(|f| PermissionRef::from(*f)).collect())
    }
}

impl<T: Into<PermissionResolvable>> From<Option<T>> for PermissionResolvable {
    fn from(perms: Option<T>) -> Self {
        perms.map(Into::into).unwrap_or_default()
    }
}

/// A resolved, immutable set of granted flags.
///
/// # Example
///
/// ```
/// use ptero_permissions::Permissions;
///
/// let perms = Permissions::new(["control.console", "control.start"]).unwrap();
/// assert!(perms.has("control.console").unwrap());
/// assert!(!perms.has(["control.console", "control.stop"]).unwrap());
/// assert_eq!(perms.to_strings(), vec!["control.console", "control.start"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
    raw: BTreeSet<Flag>,
}

impl Permissions {
    /// Build a permission set from resolvable input.
    ///
    /// # Errors
    ///
    /// Fails with [`PermissionError::MixedTypes`] if names and codes are
    /// mixed, or [`PermissionError::Unknown`] for any entry outside the
    /// flag universe.
    pub fn new(perms: impl Into<PermissionResolvable>) -> PermissionResult<Self> {
        Ok(Self {
            raw: Self::resolve(perms)?,
        })
    }

    /// The default permissions granted to a panel user.
    pub fn user_defaults() -> Self {
        Self {
            raw: [
                Flag::ControlConsole,
                Flag::ControlStart,
                Flag::ControlStop,
                Flag::ControlRestart,
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Resolve input into the canonical set of flags.
    ///
    /// String entries are translated first (uppercased, `.` becomes `_`),
    /// then every entry must name or number a known flag.
    ///
    /// # Example
    ///
    /// ```
    /// use ptero_permissions::{Flag, Permissions, PermissionError, PermissionRef};
    ///
    /// let set = Permissions::resolve([1u32, 2]).unwrap();
    /// assert!(set.contains(&Flag::ControlConsole));
    ///
    /// let mixed = vec![PermissionRef::from("control.console"), PermissionRef::from(5u32)];
    /// assert_eq!(Permissions::resolve(mixed), Err(PermissionError::MixedTypes));
    /// ```
    pub fn resolve(perms: impl Into<PermissionResolvable>) -> PermissionResult<BTreeSet<Flag>> {
        let perms = perms.into();
        let entries = perms.entries();
        if entries.is_empty() {
            return Ok(BTreeSet::new());
        }

        let has_names = entries.iter().any(|p| matches!(p, PermissionRef::Name(_)));
        let has_codes = entries.iter().any(|p| matches!(p, PermissionRef::Code(_)));
        if has_names && has_codes {
            return Err(PermissionError::MixedTypes);
        }

        if has_names {
            let names = entries.iter().filter_map(|p| match p {
                PermissionRef::Name(name) => Some(name.as_str()),
                PermissionRef::Code(_) => None,
            });
            return Self::from_strings(names);
        }

        entries
            .iter()
            .map(|p| match p {
                PermissionRef::Code(code) => {
                    Flag::from_code(*code).ok_or_else(|| PermissionError::Unknown(code.to_string()))
                }
                PermissionRef::Name(name) => Err(PermissionError::Unknown(name.clone())),
            })
            .collect()
    }

    /// Translate external-form names into flags.
    ///
    /// # Errors
    ///
    /// Fails with [`PermissionError::Unknown`] naming the translated entry
    /// that matched no flag.
    pub fn from_strings<I, S>(perms: I) -> PermissionResult<BTreeSet<Flag>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        perms
            .into_iter()
            .map(|p| {
                let name = Flag::translate(p.as_ref());
                Flag::from_name(&name).ok_or(PermissionError::Unknown(name))
            })
            .collect()
    }

    /// Check whether every given permission is held (AND semantics).
    ///
    /// # Errors
    ///
    /// Fails if the argument itself cannot be resolved.
    pub fn has(&self, perms: impl Into<PermissionResolvable>) -> PermissionResult<bool> {
        let wanted = Self::resolve(perms)?;
        Ok(wanted.iter().all(|f| self.raw.contains(f)))
    }

    /// Check a single, already-typed flag.
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.raw.contains(&flag)
    }

    /// Check whether any held flag is administrative.
    pub fn is_admin(&self) -> bool {
        self.raw.iter().any(Flag::is_admin)
    }

    /// Map every flag in the universe to whether it is held.
    pub fn to_flag_map(&self) -> BTreeMap<&'static str, bool> {
        Flag::ALL
            .iter()
            .map(|f| (f.name(), self.has_flag(*f)))
            .collect()
    }

    /// Get the raw name-to-code mapping of held flags.
    pub fn raw(&self) -> BTreeMap<&'static str, u32> {
        self.raw.iter().map(|f| (f.name(), f.code())).collect()
    }

    /// Get the held flags.
    pub fn flags(&self) -> &BTreeSet<Flag> {
        &self.raw
    }

    /// Held flag names in internal form, in code order.
    pub fn to_array(&self) -> Vec<&'static str> {
        self.raw.iter().map(Flag::name).collect()
    }

    /// Held flag names in external form, in code order.
    pub fn to_strings(&self) -> Vec<String> {
        self.raw.iter().map(Flag::external_name).collect()
    }

    /// Get the count of held flags.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Check if no flag is held.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl FromIterator<Flag> for Permissions {
    fn from_iter<T: IntoIterator<Item = Flag>>(iter: T) -> Self {
        Self {
            raw: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.raw.iter().map(Flag::external_name))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireInput {
    List(Vec<PermissionRef>),
    Keys(BTreeMap<String, IgnoredAny>),
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = match WireInput::deserialize(deserializer)? {
            WireInput::List(refs) => PermissionResolvable::from(refs),
            WireInput::Keys(map) => PermissionResolvable::from(&map),
        };
        Permissions::new(input).map_err(serde::de::Error::custom)
    }
}
