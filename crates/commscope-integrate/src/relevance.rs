//! Keyword relevance classifier for student and early-career communities.

use std::fmt;

use commscope_core::CanonicalCommunity;
use serde::Serialize;

/// Student vocabulary. Matched as lowercase substrings.
pub(crate) const STUDENT_KEYWORDS: &[&str] = &[
    "college",
    "university",
    "student",
    "campus",
    "dorm",
    "study",
    "education",
    "academic",
    "school",
    "grad",
    "undergrad",
    "freshman",
    "sophomore",
    "junior",
    "senior",
    "major",
    "degree",
    "homework",
    "thesis",
    "professor",
    "class",
    "lecturer",
    "assignments",
    "exam",
    "test",
];

/// Professional vocabulary. Matched as lowercase substrings.
pub(crate) const PROFESSIONAL_KEYWORDS: &[&str] = &[
    "career",
    "job",
    "profession",
    "resume",
    "interview",
    "internship",
    "salary",
    "workplace",
    "office",
    "corporate",
    "employment",
    "hire",
    "recruiting",
    "professional",
    "entry level",
    "engineer",
    "programmer",
    "developer",
    "manager",
    "hr",
    "benefits",
    "promotion",
    "skills",
    "linkedin",
    "networking",
];

const NAME_WEIGHT: u32 = 3;
const DESCRIPTION_WEIGHT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommunityType {
    #[serde(rename = "Student-focused")]
    StudentFocused,
    #[serde(rename = "Professional-focused")]
    ProfessionalFocused,
    Mixed,
    /// Never produced by [`classify`]: equal scores, including zero, are `Mixed`.
    Other,
}

impl fmt::Display for CommunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CommunityType::StudentFocused => "Student-focused",
            CommunityType::ProfessionalFocused => "Professional-focused",
            CommunityType::Mixed => "Mixed",
            CommunityType::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelevanceScore {
    pub student_score: u32,
    pub professional_score: u32,
    pub relevance_score: u32,
    pub community_type: CommunityType,
}

impl RelevanceScore {
    fn from_scores(student_score: u32, professional_score: u32) -> Self {
        let community_type = match student_score.cmp(&professional_score) {
            std::cmp::Ordering::Greater => CommunityType::StudentFocused,
            std::cmp::Ordering::Less => CommunityType::ProfessionalFocused,
            std::cmp::Ordering::Equal => CommunityType::Mixed,
        };
        Self {
            student_score,
            professional_score,
            relevance_score: student_score + professional_score,
            community_type,
        }
    }
}

/// A community together with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedCommunity {
    #[serde(flatten)]
    pub community: CanonicalCommunity,
    #[serde(flatten)]
    pub score: RelevanceScore,
}

fn keyword_score(keywords: &[&str], name: &str, description: &str) -> u32 {
    keywords
        .iter()
        .map(|keyword| {
            let mut score = 0;
            if name.contains(keyword) {
                score += NAME_WEIGHT;
            }
            if description.contains(keyword) {
                score += DESCRIPTION_WEIGHT;
            }
            score
        })
        .sum()
}

/// Score a community's name and description against both vocabularies.
///
/// A keyword found in the name is worth 3, in the description 1. Matching is
/// case-insensitive substring containment, so `"grad"` also matches
/// `"undergrad"`.
#[must_use]
pub fn classify(name: &str, description: &str) -> RelevanceScore {
    let name = name.to_lowercase();
    let description = description.to_lowercase();
    RelevanceScore::from_scores(
        keyword_score(STUDENT_KEYWORDS, &name, &description),
        keyword_score(PROFESSIONAL_KEYWORDS, &name, &description),
    )
}

/// Keep the communities with a positive relevance score, most relevant first
/// and larger first within equal relevance.
///
/// When nothing matches, every community is kept with relevance 1 and both
/// side scores at zero, so downstream reports are never empty.
#[must_use]
pub fn filter_relevant(communities: &[CanonicalCommunity]) -> Vec<ClassifiedCommunity> {
    let scored: Vec<ClassifiedCommunity> = communities
        .iter()
        .map(|community| ClassifiedCommunity {
            score: classify(&community.name, &community.description),
            community: community.clone(),
        })
        .collect();

    let mut relevant: Vec<ClassifiedCommunity> = scored
        .iter()
        .filter(|c| c.score.relevance_score > 0)
        .cloned()
        .collect();

    if relevant.is_empty() && !scored.is_empty() {
        tracing::warn!(
            count = scored.len(),
            "no keyword matches; keeping every community at relevance 1"
        );
        relevant = scored
            .into_iter()
            .map(|mut c| {
                c.score = RelevanceScore {
                    relevance_score: 1,
                    ..RelevanceScore::from_scores(0, 0)
                };
                c
            })
            .collect();
    }

    relevant.sort_by(|a, b| {
        b.score
            .relevance_score
            .cmp(&a.score.relevance_score)
            .then(b.community.member_count.cmp(&a.community.member_count))
    });

    tracing::info!(
        input = communities.len(),
        relevant = relevant.len(),
        "classified communities"
    );

    relevant
}
