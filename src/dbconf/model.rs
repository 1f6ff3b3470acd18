//! Configuration model and merge rules.

use std::collections::BTreeMap;

/// The multi-valued key whose every declaration is kept, in order.
pub const JVM_ADDITIONAL_KEY: &str = "dbms.jvm.additional";

/// A database configuration as declared in a `neo4j.conf` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbmsConfiguration {
    /// Scalar settings. Never contains [`JVM_ADDITIONAL_KEY`].
    pub entries: BTreeMap<String, String>,
    /// Every `dbms.jvm.additional` declaration in file order.
    pub jvm_additional: Vec<String>,
}

impl DbmsConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from scalar entries; a stray JVM key is moved into `jvm_additional`.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut config = Self::default();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            if key == JVM_ADDITIONAL_KEY {
                config.jvm_additional.push(value);
            } else {
                config.entries.insert(key, value);
            }
        }
        config
    }

    pub fn with_jvm_additional<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.jvm_additional = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of scalar entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Right-biased shallow merge.
    ///
    /// Every key of `other` overwrites the same key here. A non-empty
    /// `other.jvm_additional` replaces ours entirely, an empty one keeps ours.
    pub fn merge(&self, other: &DbmsConfiguration) -> DbmsConfiguration {
        let mut entries = self.entries.clone();
        for (key, value) in &other.entries {
            entries.insert(key.clone(), value.clone());
        }

        let jvm_additional = if other.jvm_additional.is_empty() {
            self.jvm_additional.clone()
        } else {
            other.jvm_additional.clone()
        };

        DbmsConfiguration {
            entries,
            jvm_additional,
        }
    }

    /// Apply values forced by the deployment mechanism.
    pub fn with_overrides(&self, overrides: &OverrideSet) -> DbmsConfiguration {
        self.merge(&overrides.to_configuration())
    }
}

/// Settings the deployment always forces, whatever the file says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideSet {
    values: BTreeMap<String, String>,
}

impl OverrideSet {
    pub fn new<K, V, I>(values: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// HTTPS on, bolt TLS required.
    pub fn deployment_defaults() -> Self {
        Self::new([
            ("dbms.connector.https.enabled", "true"),
            ("dbms.connector.bolt.tls_level", "REQUIRED"),
        ])
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn to_configuration(&self) -> DbmsConfiguration {
        DbmsConfiguration::from_entries(self.values.clone())
    }
}

impl Default for OverrideSet {
    fn default() -> Self {
        Self::deployment_defaults()
    }
}

impl From<BTreeMap<String, String>> for OverrideSet {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}
