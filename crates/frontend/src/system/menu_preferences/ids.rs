use uuid::Uuid;

/// Mints ids for user menu items.
///
/// Shape: `{prefix}-{source}-{millis}-{random}`. The random part keeps two
/// copies of the same source made within one clock tick apart.
#[derive(Debug, Clone, PartialEq)]
pub struct IdMinter {
    prefix: String,
}

impl IdMinter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn mint(&self, source_id: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let random = Uuid::new_v4().simple().to_string();
        format!("{}-{}-{}-{}", self.prefix, source_id, millis, &random[..12])
    }
}

impl Default for IdMinter {
    fn default() -> Self {
        Self::new("user")
    }
}
