use crate::client_discovery::domain::{ComponentIdentity, UsagePage};

/// Turns usage page rows into candidate identities.
///
/// Each row is expected to carry exactly two links: group id then artifact id.
/// Rows with any other link count, or whose texts are not valid coordinates,
/// are skipped without error. Repeats are kept.
pub struct CandidateExtractor;

impl CandidateExtractor {
    pub fn extract(page: &UsagePage) -> Vec<ComponentIdentity> {
        page.rows()
            .iter()
            .filter_map(|row| match row.links() {
                [group, artifact] => match ComponentIdentity::new(group.trim(), artifact.trim()) {
                    Ok(identity) => Some(identity),
                    Err(e) => {
                        tracing::debug!(error = %e, "skipping usage row with invalid coordinates");
                        None
                    }
                },
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client_discovery::domain::UsageRow;

    fn row(links: &[&str]) -> UsageRow {
        UsageRow::new(links.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_extracts_one_candidate_per_two_link_row() {
        let page = UsagePage::new(vec![row(&["x", "a"]), row(&["x", "b"])]);
        let candidates = CandidateExtractor::extract(&page);

        assert_eq!(
            candidates,
            vec![
                ComponentIdentity::new("x", "a").unwrap(),
                ComponentIdentity::new("x", "b").unwrap()
            ]
        );
    }

    #[test]
    fn test_skips_rows_with_other_link_counts() {
        let page = UsagePage::new(vec![
            row(&["x"]),
            row(&["x", "a"]),
            row(&["x", "b", "extra"]),
            row(&[]),
        ]);
        let candidates = CandidateExtractor::extract(&page);

        assert_eq!(candidates, vec![ComponentIdentity::new("x", "a").unwrap()]);
    }

    #[test]
    fn test_skips_rows_with_invalid_coordinates() {
        let page = UsagePage::new(vec![row(&["x y", "a"]), row(&["", "b"]), row(&["x", "c"])]);
        let candidates = CandidateExtractor::extract(&page);

        assert_eq!(candidates, vec![ComponentIdentity::new("x", "c").unwrap()]);
    }

    #[test]
    fn test_keeps_repeats() {
        let page = UsagePage::new(vec![row(&["x", "a"]), row(&[" x ", " a "])]);
        assert_eq!(CandidateExtractor::extract(&page).len(), 2);
    }

    #[test]
    fn test_empty_page() {
        assert!(CandidateExtractor::extract(&UsagePage::default()).is_empty());
    }
}
