//! Remote operations: an action name plus its query parameters.

use std::collections::BTreeMap;

/// An operation to invoke, e.g. `SubmitFeed` with its parameters.
///
/// Built with consuming methods; once handed to a client it is not changed.
///
/// ```rust
/// use mws_core::operation::Operation;
///
/// let op = Operation::new("RequestReport")
///     .param("ReportType", "_GET_FLAT_FILE_OPEN_LISTINGS_DATA_")
///     .optional_param("StartDate", None::<String>)
///     .list_param("MarketplaceIdList.Id", ["ATVPDKIKX0DER", "A2EUQ1WTGCTBG2"]);
///
/// assert_eq!(op.action(), "RequestReport");
/// assert_eq!(op.get("MarketplaceIdList.Id.2"), Some("A2EUQ1WTGCTBG2"));
/// assert!(op.get("StartDate").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    action: String,
    params: BTreeMap<String, String>,
}

impl Operation {
    /// Creates an operation without parameters.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            params: BTreeMap::new(),
        }
    }

    /// Creates an operation from an action and a parameter set.
    pub fn with_params<K, V>(action: impl Into<String>, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        params
            .into_iter()
            .fold(Self::new(action), |op, (k, v)| op.param(k, v))
    }

    /// Sets a parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets a parameter if a value is given.
    #[must_use]
    pub fn optional_param<V: Into<String>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Sets a list parameter using the service's `Key.1`, `Key.2`, ... convention.
    #[must_use]
    pub fn list_param<V: Into<String>>(
        mut self,
        key: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        for (index, value) in values.into_iter().enumerate() {
            self.params
                .insert(format!("{key}.{}", index + 1), value.into());
        }
        self
    }

    /// Action name.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// All parameters, ordered by key.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Looks up a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
