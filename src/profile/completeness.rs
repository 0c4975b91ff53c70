use uuid::Uuid;

use crate::error::AppError;
use crate::models::{ProfileFields, TalentProfile};

pub const TRANSCRIPT_MAX_CHARS: usize = 1000;
pub const STATEMENT_MAX_CHARS: usize = 2000;
pub const BIO_MAX_CHARS: usize = 500;

/// The fields that count toward completeness, in reporting order.
pub const TRACKED_FIELDS: [&str; 10] = [
    "first_name",
    "last_name",
    "bio",
    "headline",
    "skills",
    "experience_level",
    "location",
    "transcript",
    "statement_of_purpose",
    "resume_url",
];

/// Checks the length limits on `fields` and, if they hold, replaces every
/// writable field of the existing profile (or a new one for `user_id`).
///
/// Limits are counted in characters and checked in a fixed order: transcript,
/// statement of purpose, bio. The first violation is returned.
pub fn validate_and_merge(
    user_id: &str,
    existing: Option<TalentProfile>,
    fields: ProfileFields,
) -> Result<TalentProfile, AppError> {
    check_length(&fields.transcript, TRANSCRIPT_MAX_CHARS, "transcript too long")?;
    check_length(
        &fields.statement_of_purpose,
        STATEMENT_MAX_CHARS,
        "statement too long",
    )?;
    check_length(&fields.bio, BIO_MAX_CHARS, "bio too long")?;

    let mut profile = existing
        .unwrap_or_else(|| TalentProfile::new(Uuid::new_v4().to_string(), user_id.to_string()));
    profile.replace_fields(fields);
    Ok(profile)
}

fn check_length(value: &Option<String>, max: usize, reason: &str) -> Result<(), AppError> {
    match value {
        Some(text) if text.chars().count() > max => {
            Err(AppError::ValidationFailed(reason.to_string()))
        }
        _ => Ok(()),
    }
}

/// Scores `profile` against the tracked fields.
///
/// Returns the percentage of tracked fields present, truncated toward zero,
/// and the names of the absent ones in `TRACKED_FIELDS` order.
pub fn compute_completeness(profile: &TalentProfile) -> (i32, Vec<String>) {
    let present = [
        is_filled(&profile.first_name),
        is_filled(&profile.last_name),
        is_filled(&profile.bio),
        is_filled(&profile.headline),
        profile.skills.as_ref().is_some_and(|skills| !skills.is_empty()),
        is_filled(&profile.experience_level),
        is_filled(&profile.location),
        is_filled(&profile.transcript),
        is_filled(&profile.statement_of_purpose),
        is_filled(&profile.resume_url),
    ];

    let missing: Vec<String> = TRACKED_FIELDS
        .iter()
        .zip(present.iter())
        .filter(|(_, filled)| !**filled)
        .map(|(name, _)| name.to_string())
        .collect();

    let filled = (TRACKED_FIELDS.len() - missing.len()) as f64;
    let score = (filled / TRACKED_FIELDS.len() as f64 * 100.0) as i32;
    (score, missing)
}

/// Recomputes and stores the derived completeness fields on `profile`.
pub fn refresh_completeness(profile: &mut TalentProfile) {
    let (score, missing) = compute_completeness(profile);
    profile.completeness = score;
    profile.missing_fields = missing;
}

/// Present means non-empty after trimming Unicode whitespace, so a value of
/// only non-breaking spaces counts as missing.
fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_fields() -> ProfileFields {
        ProfileFields {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            bio: Some("Analyst".into()),
            headline: Some("First programmer".into()),
            skills: Some(vec!["maths".into(), "engines".into()]),
            experience_level: Some("senior".into()),
            location: Some("London".into()),
            transcript: Some("All A grades".into()),
            statement_of_purpose: Some("To compute".into()),
            resume_url: Some("https://example.com/cv.pdf".into()),
            ..Default::default()
        }
    }

    fn scored(fields: ProfileFields) -> (i32, Vec<String>) {
        let profile = validate_and_merge("user-1", None, fields).unwrap();
        compute_completeness(&profile)
    }

    #[test]
    fn test_all_tracked_fields_present() {
        assert_eq!(scored(full_fields()), (100, Vec::<String>::new()));
    }

    #[test]
    fn test_no_tracked_fields_present() {
        let (score, missing) = scored(ProfileFields {
            company: Some("Acme".into()),
            graduation_year: Some(2020),
            ..Default::default()
        });
        assert_eq!(score, 0);
        assert_eq!(missing, TRACKED_FIELDS.to_vec());
    }

    #[test]
    fn test_partial_scores_truncate() {
        let three = ProfileFields {
            first_name: Some("Ada".into()),
            bio: Some("Analyst".into()),
            resume_url: Some("https://example.com/cv.pdf".into()),
            ..Default::default()
        };
        let (score, missing) = scored(three);
        assert_eq!(score, 30);
        assert_eq!(
            missing,
            vec![
                "last_name",
                "headline",
                "skills",
                "experience_level",
                "location",
                "transcript",
                "statement_of_purpose",
            ]
        );

        let seven = ProfileFields {
            headline: None,
            transcript: None,
            statement_of_purpose: None,
            ..full_fields()
        };
        assert_eq!(scored(seven).0, 70);

        let one = ProfileFields {
            location: Some("Paris".into()),
            ..Default::default()
        };
        assert_eq!(scored(one), (10, vec![
            "first_name".to_string(),
            "last_name".to_string(),
            "bio".to_string(),
            "headline".to_string(),
            "skills".to_string(),
            "experience_level".to_string(),
            "transcript".to_string(),
            "statement_of_purpose".to_string(),
            "resume_url".to_string(),
        ]));
    }

    #[test]
    fn test_blank_strings_and_empty_skills_are_missing() {
        let (score, missing) = scored(ProfileFields {
            first_name: Some("   ".into()),
            last_name: Some("\t\n".into()),
            skills: Some(vec![]),
            ..full_fields()
        });
        assert_eq!(score, 70);
        assert_eq!(missing, vec!["first_name", "last_name", "skills"]);
    }

    #[test]
    fn test_unicode_whitespace_counts_as_blank() {
        let (score, missing) = scored(ProfileFields {
            first_name: Some("\u{00A0}\u{2003}".into()),
            last_name: Some("\u{00A0}Doe".into()),
            ..full_fields()
        });
        assert_eq!(score, 90);
        assert_eq!(missing, vec!["first_name"]);
    }

    #[test]
    fn test_length_limits_are_inclusive() {
        let fields = ProfileFields {
            transcript: Some("t".repeat(TRANSCRIPT_MAX_CHARS)),
            statement_of_purpose: Some("s".repeat(STATEMENT_MAX_CHARS)),
            bio: Some("b".repeat(BIO_MAX_CHARS)),
            ..Default::default()
        };
        assert!(validate_and_merge("user-1", None, fields).is_ok());
    }

    #[test]
    fn test_length_violations() {
        let cases = [
            (
                ProfileFields {
                    transcript: Some("a".repeat(1001)),
                    ..full_fields()
                },
                "transcript too long",
            ),
            (
                ProfileFields {
                    statement_of_purpose: Some("a".repeat(2001)),
                    ..full_fields()
                },
                "statement too long",
            ),
            (
                ProfileFields {
                    bio: Some("a".repeat(501)),
                    ..full_fields()
                },
                "bio too long",
            ),
        ];

        for (fields, expected) in cases {
            match validate_and_merge("user-1", None, fields) {
                Err(AppError::ValidationFailed(reason)) => assert_eq!(reason, expected),
                other => panic!("expected ValidationFailed({}), got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_transcript_reported_before_other_violations() {
        let fields = ProfileFields {
            transcript: Some("a".repeat(1001)),
            statement_of_purpose: Some("a".repeat(2001)),
            bio: Some("a".repeat(501)),
            ..Default::default()
        };
        match validate_and_merge("user-1", None, fields) {
            Err(AppError::ValidationFailed(reason)) => assert_eq!(reason, "transcript too long"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_limits_count_characters_not_bytes() {
        // 500 two-byte characters is 1000 bytes but still within the bio limit.
        let fields = ProfileFields {
            bio: Some("é".repeat(500)),
            ..Default::default()
        };
        assert!(validate_and_merge("user-1", None, fields).is_ok());
    }

    #[test]
    fn test_merge_keeps_identity_of_existing_profile() {
        let mut existing = TalentProfile::new("profile-9".into(), "user-1".into());
        existing.profile_visible = false;
        existing.company = Some("Old Co".into());

        let merged = validate_and_merge("user-1", Some(existing), full_fields()).unwrap();

        assert_eq!(merged.id, "profile-9");
        assert_eq!(merged.user_id, "user-1");
        assert!(!merged.profile_visible);
        assert!(merged.company.is_none());
    }

    #[test]
    fn test_new_profile_gets_fresh_id_and_is_visible() {
        let merged = validate_and_merge("user-7", None, ProfileFields::default()).unwrap();
        assert_eq!(merged.user_id, "user-7");
        assert!(!merged.id.is_empty());
        assert!(merged.profile_visible);
    }

    #[test]
    fn test_refresh_overrides_stale_derived_values() {
        let mut profile = validate_and_merge("user-1", None, full_fields()).unwrap();
        profile.completeness = 3;
        profile.missing_fields = vec!["bogus".into()];

        refresh_completeness(&mut profile);

        assert_eq!(profile.completeness, 100);
        assert!(profile.missing_fields.is_empty());
    }
}
