//! Cross-field validation and normalization for image and server records.
//!
//! Every check takes the full candidate record state and runs before
//! anything is written, so no assignment order can persist an inconsistent
//! combination: inserts validate the constructed row, updates merge the
//! requested changes into the current row and re-validate the whole result.

use chrono::NaiveDate;

use cloudmeta_common::types::ServerType;

use crate::error::{Result, StorageError};

/// Checks the lifecycle date ordering of an image record: `deprecatedon`
/// and `deletedon` must not precede `publishedon`, and `deletedon` must not
/// precede `deprecatedon`.
pub fn check_image_dates(
    table: &'static str,
    publishedon: NaiveDate,
    deprecatedon: Option<NaiveDate>,
    deletedon: Option<NaiveDate>,
) -> Result<()> {
    if let Some(deprecated) = deprecatedon {
        if deprecated < publishedon {
            return Err(StorageError::Validation {
                table,
                field: "deprecatedon",
                value: deprecated.to_string(),
                reason: format!("publishedon({publishedon}) should not be after deprecatedon({deprecated})"),
            });
        }
    }
    if let Some(deleted) = deletedon {
        if deleted < publishedon {
            return Err(StorageError::Validation {
                table,
                field: "deletedon",
                value: deleted.to_string(),
                reason: format!("publishedon({publishedon}) should not be after deletedon({deleted})"),
            });
        }
    }
    if let (Some(deprecated), Some(deleted)) = (deprecatedon, deletedon) {
        if deleted < deprecated {
            return Err(StorageError::Validation {
                table,
                field: "deletedon",
                value: deleted.to_string(),
                reason: format!("deprecatedon({deprecated}) should not be after deletedon({deleted})"),
            });
        }
    }
    Ok(())
}

/// Normalizes a change-info URL to end with `/`. Empty and unset values
/// pass through unchanged; a rewrite is logged.
pub fn normalize_changeinfo(table: &'static str, value: Option<String>) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() && !v.ends_with('/') => {
            let normalized = format!("{v}/");
            tracing::info!(table, field = "changeinfo", value = %normalized, "updated");
            Some(normalized)
        }
        other => other,
    }
}

/// Requires a non-empty `name` on update servers. Region servers may be
/// nameless.
pub fn check_server_name(
    table: &'static str,
    server_type: ServerType,
    name: Option<&str>,
) -> Result<()> {
    if server_type == ServerType::Update && name.map_or(true, str::is_empty) {
        return Err(StorageError::Validation {
            table,
            field: "name",
            value: name.unwrap_or_default().to_string(),
            reason: "name cannot be null/empty for an update server".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn ordered_dates_pass() {
        check_image_dates("amazonimages", date("2024-01-01"), None, None).unwrap();
        check_image_dates(
            "amazonimages",
            date("2024-01-01"),
            Some(date("2024-01-01")),
            None,
        )
        .unwrap();
        check_image_dates(
            "amazonimages",
            date("2024-01-01"),
            Some(date("2024-02-01")),
            Some(date("2024-03-01")),
        )
        .unwrap();
        check_image_dates(
            "amazonimages",
            date("2024-01-01"),
            None,
            Some(date("2024-03-01")),
        )
        .unwrap();
    }

    #[test]
    fn deprecated_before_published_fails() {
        let err = check_image_dates(
            "amazonimages",
            date("2024-02-01"),
            Some(date("2024-01-01")),
            None,
        )
        .unwrap_err();
        assert!(
            matches!(err, StorageError::Validation { field: "deprecatedon", .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn deleted_before_published_fails() {
        let err = check_image_dates(
            "googleimages",
            date("2024-02-01"),
            None,
            Some(date("2024-01-01")),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Validation { field: "deletedon", .. }
        ));
    }

    #[test]
    fn deleted_before_deprecated_fails() {
        let err = check_image_dates(
            "oracleimages",
            date("2024-01-01"),
            Some(date("2024-03-01")),
            Some(date("2024-02-01")),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Validation { field: "deletedon", .. }
        ));
    }

    #[test]
    fn changeinfo_gains_trailing_slash() {
        assert_eq!(
            normalize_changeinfo("amazonimages", Some("https://x".to_string())),
            Some("https://x/".to_string())
        );
    }

    #[test]
    fn changeinfo_normalization_is_idempotent() {
        assert_eq!(
            normalize_changeinfo("amazonimages", Some("https://x/".to_string())),
            Some("https://x/".to_string())
        );
        assert_eq!(normalize_changeinfo("amazonimages", Some(String::new())), Some(String::new()));
        assert_eq!(normalize_changeinfo("amazonimages", None), None);
    }

    #[test]
    fn update_server_requires_name() {
        let err = check_server_name("amazonservers", ServerType::Update, None).unwrap_err();
        assert!(matches!(err, StorageError::Validation { field: "name", .. }));
        let err = check_server_name("amazonservers", ServerType::Update, Some("")).unwrap_err();
        assert!(matches!(err, StorageError::Validation { field: "name", .. }));
        check_server_name("amazonservers", ServerType::Update, Some("srv1")).unwrap();
    }

    #[test]
    fn region_server_may_be_nameless() {
        check_server_name("googleservers", ServerType::Region, None).unwrap();
        check_server_name("googleservers", ServerType::Region, Some("")).unwrap();
    }
}
