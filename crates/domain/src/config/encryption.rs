use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncryptionConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_key_file")]
    pub key_file: String,
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key_file: default_key_file(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_key_file() -> String {
    "enc.key".to_string()
}
