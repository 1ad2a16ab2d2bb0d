use serde::{Deserialize, Serialize};

/// A list endpoint either answers with a bare JSON array or with a paged
/// envelope whose rows sit under `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Paged {
        results: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
    },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(rows) => rows,
            ListEnvelope::Paged { results, .. } => results,
        }
    }

    /// Server-reported total when the envelope carries one.
    pub fn reported_count(&self) -> Option<u64> {
        match self {
            ListEnvelope::Bare(_) => None,
            ListEnvelope::Paged { count, .. } => *count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::Definition;

    #[test]
    fn bare_array_and_envelope_unwrap_the_same() {
        let bare: ListEnvelope<Definition> =
            serde_json::from_str(r#"[{"id": 1, "term": "Student"}]"#).unwrap();
        let paged: ListEnvelope<Definition> = serde_json::from_str(
            r#"{"count": 41, "next": "http://x/?page=2", "previous": null, "results": [{"id": 1, "term": "Student"}]}"#,
        )
        .unwrap();

        assert_eq!(bare.reported_count(), None);
        assert_eq!(paged.reported_count(), Some(41));
        assert_eq!(bare.into_vec(), paged.into_vec());
    }

    #[test]
    fn object_without_results_is_rejected() {
        let parsed = serde_json::from_str::<ListEnvelope<Definition>>(r#"{"data": []}"#);
        assert!(parsed.is_err());
    }
}
