use serde::{Deserialize, Serialize};

/// Naming of the backing stores. These settings are optional and are fixed once the factories of a
/// [`StateContext`](crate::StateContext) are created.
///
/// Defaults to
///
/// ```
/// # use yokai_state::StateConfiguration;
/// let configuration = StateConfiguration {
///     common_store_name: "common_prefs".to_string(),
///     secure_store_prefix: "secure_prefs_".to_string(),
///     master_key_alias: "yokai_master_key".to_string(),
/// };
/// assert_eq!(configuration, StateConfiguration::default());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StateConfiguration {
    /// Store shared by every plain namespace. Defaults to `common_prefs`
    pub common_store_name: String,
    /// Prefix of the per-namespace secure stores. Defaults to `secure_prefs_`
    pub secure_store_prefix: String,
    /// Alias the master key of the secure stores is requested under. Defaults to
    /// `yokai_master_key`
    pub master_key_alias: String,
}

impl Default for StateConfiguration {
    fn default() -> Self {
        Self {
            common_store_name: "common_prefs".into(),
            secure_store_prefix: "secure_prefs_".into(),
            master_key_alias: "yokai_master_key".into(),
        }
    }
}

impl StateConfiguration {
    /// Name of the secure store backing namespace `id`.
    pub fn secure_store_name(&self, id: &str) -> String {
        format!("{}{}", self.secure_store_prefix, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_configuration_uses_defaults() {
        let configuration: StateConfiguration =
            serde_json::from_str(r#"{ "commonStoreName": "shared" }"#).unwrap();

        assert_eq!(configuration.common_store_name, "shared");
        assert_eq!(configuration.secure_store_prefix, "secure_prefs_");
        assert_eq!(configuration.master_key_alias, "yokai_master_key");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<StateConfiguration>(r#"{ "storeName": "shared" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_secure_store_name() {
        let configuration = StateConfiguration::default();
        assert_eq!(configuration.secure_store_name("yokai"), "secure_prefs_yokai");
    }
}
