use storage::KeyValueStore;

use crate::collection::read_local_entries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub stored_entries: usize,
}

impl DashboardSummary {
    pub async fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            stored_entries: read_local_entries(store).await.len(),
        }
    }

    pub fn headline(&self) -> String {
        match self.stored_entries {
            0 => "No entries found in local database.".to_string(),
            n => format!("{n} Active Dossiers Registered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use storage::MemoryStore;

    use super::*;
    use crate::collection::STUDENTS_KEY;

    #[tokio::test]
    async fn empty_store_reports_no_entries() {
        let summary = DashboardSummary::load(&MemoryStore::new()).await;
        assert_eq!(summary.stored_entries, 0);
        assert_eq!(summary.headline(), "No entries found in local database.");
    }

    #[tokio::test]
    async fn counts_persisted_entries() {
        let store = MemoryStore::with_value(
            STUDENTS_KEY,
            r#"[{"id":1,"name":"Ann","email":"a@x.com","phone":"0123456789","gender":"Female"},
                {"id":2,"name":"Bob","email":"b@x.com","phone":"9876543210","gender":"Male"}]"#,
        );
        let summary = DashboardSummary::load(&store).await;
        assert_eq!(summary.stored_entries, 2);
        assert_eq!(summary.headline(), "2 Active Dossiers Registered");
    }

    #[tokio::test]
    async fn malformed_collection_counts_as_empty() {
        let store = MemoryStore::with_value(STUDENTS_KEY, "{not json");
        assert_eq!(DashboardSummary::load(&store).await.stored_entries, 0);
    }
}
