use std::collections::HashSet;

use crate::models::{Designer, Founder, ScoringWeights};

/// Score how well a designer fits a founder's stated needs
///
/// Scoring formula:
/// score = (
///     keyword * shared_tokens +           # need tokens found in the skills
///     experience_per_char * len(exp)      # longer experience text ranks higher
/// )
///
/// Tokens come from splitting on commas, then lowercasing and trimming. Each
/// need token counts once per occurrence in `needs`. Experience length is a
/// character count, not a word count.
pub fn score_match(founder: &Founder, designer: &Designer, weights: &ScoringWeights) -> f64 {
    let keyword_hits = count_keyword_hits(
        founder.needs.as_deref().unwrap_or_default(),
        designer.skills.as_deref().unwrap_or_default(),
    );

    let experience_chars = designer
        .experience
        .as_deref()
        .map_or(0, |exp| exp.chars().count());

    keyword_hits as f64 * weights.keyword + experience_chars as f64 * weights.experience_per_char
}

/// Number of need tokens that also appear among the skill tokens
#[inline]
pub fn count_keyword_hits(needs: &str, skills: &str) -> usize {
    if needs.is_empty() || skills.is_empty() {
        return 0;
    }

    let skill_set: HashSet<String> = tokenize(skills).collect();

    tokenize(needs)
        .filter(|need| skill_set.contains(need))
        .count()
}

/// Comma-separated, lowercased, trimmed; blank tokens are kept
fn tokenize(field: &str) -> impl Iterator<Item = String> + '_ {
    field.split(',').map(|token| token.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn founder(needs: Option<&str>) -> Founder {
        Founder {
            id: 1,
            name: "Fay".to_string(),
            email: "fay@example.com".to_string(),
            project: Some("Coffee app".to_string()),
            needs: needs.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn designer(skills: Option<&str>, experience: Option<&str>) -> Designer {
        Designer {
            id: 2,
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            skills: skills.map(str::to_string),
            experience: experience.map(str::to_string),
            credits: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reference_score() {
        let score = score_match(
            &founder(Some("Branding, Web Design")),
            &designer(Some("branding, illustration"), Some("5 years")),
            &ScoringWeights::default(),
        );

        assert!((score - 11.4).abs() < 1e-9, "Expected 11.4, got {}", score);
    }

    #[test]
    fn test_empty_fields_score_zero_keywords() {
        let weights = ScoringWeights::default();

        assert_eq!(score_match(&founder(Some("")), &designer(Some("branding"), None), &weights), 0.0);
        assert_eq!(score_match(&founder(Some("branding")), &designer(None, None), &weights), 0.0);
        assert_eq!(score_match(&founder(None), &designer(Some("branding"), None), &weights), 0.0);
    }

    #[test]
    fn test_experience_counts_characters() {
        let weights = ScoringWeights::default();
        // 10 characters, two of them multibyte
        let score = score_match(&founder(None), &designer(None, Some("éé years!!")), &weights);

        assert!((score - 2.0).abs() < 1e-9, "Expected 2.0, got {}", score);
    }

    #[test]
    fn test_keyword_hits_are_case_and_space_insensitive() {
        assert_eq!(count_keyword_hits("  React ,FIGMA", "figma,react  "), 2);
        assert_eq!(count_keyword_hits("web design", "web, design"), 0);
    }

    #[test]
    fn test_repeated_need_counts_each_time() {
        assert_eq!(count_keyword_hits("react, react", "react"), 2);
    }

    #[test]
    fn test_blank_tokens_match_each_other() {
        // a trailing comma on both sides leaves one shared empty token
        assert_eq!(count_keyword_hits("react,", "figma,"), 1);
        assert_eq!(count_keyword_hits(" ", " "), 1);
        assert_eq!(count_keyword_hits("react,", "figma"), 0);

        let score = score_match(
            &founder(Some("react,")),
            &designer(Some("figma,"), None),
            &ScoringWeights::default(),
        );
        assert!((score - 10.0).abs() < 1e-9, "Expected 10.0, got {}", score);
    }
}
